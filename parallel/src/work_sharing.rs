use {
    crate::{Parallelizer, Task},
    rayon::iter::{IntoParallelIterator, ParallelIterator},
};

/// Delegates scheduling to rayon's global work-sharing pool.
///
/// Same contract as [`FixedThreadsParallelizer`](crate::FixedThreadsParallelizer);
/// the thread budget and nesting behavior are whatever the rayon runtime
/// provides.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayonParallelizer;

impl Parallelizer for RayonParallelizer {
    fn parallel_for<F>(&self, first: usize, last: usize, body: F)
    where
        F: Fn(usize) + Sync,
    {
        (first..last).into_par_iter().for_each(|i| body(i));
    }

    fn parallel_calls(&self, tasks: Vec<Task<'_>>) {
        tasks.into_par_iter().for_each(|task| task());
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::sync::atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn parallel_for_matches_sequential_sum() {
        let sum = AtomicUsize::new(0);
        RayonParallelizer.parallel_for(0, 1000, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });
        assert_eq!(sum.into_inner(), (0..1000).sum());
    }

    #[test]
    fn parallel_calls_runs_all_tasks() {
        let counter = AtomicUsize::new(0);
        let tasks: Vec<Task> = (0..32)
            .map(|_| {
                let counter = &counter;
                Box::new(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                }) as Task
            })
            .collect();

        RayonParallelizer.parallel_calls(tasks);
        assert_eq!(counter.into_inner(), 32);
    }
}
