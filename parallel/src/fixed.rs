use {
    crate::{Parallelizer, Task},
    std::{
        collections::VecDeque,
        num::NonZeroUsize,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        thread,
    },
};

/// Bounded fork-join pool built on scoped threads.
///
/// The pool never holds more than `limit` threads in flight, counting the
/// caller. An atomic counter records how many threads are currently claimed;
/// a nested `parallel_for` or `parallel_calls` entered from a worker observes
/// a fully claimed counter, spawns nothing, and runs inline on the worker
/// that entered it. Independent instances share no state.
pub struct FixedThreadsParallelizer {
    limit: usize,
    claimed: AtomicUsize,
}

impl FixedThreadsParallelizer {
    /// Pool with at most `limit_thread_count` concurrent threads, caller
    /// included. A limit of zero is treated as one.
    pub fn new(limit_thread_count: usize) -> Self {
        Self {
            limit: limit_thread_count.max(1),
            // The caller itself occupies one slot.
            claimed: AtomicUsize::new(1),
        }
    }
}

impl Default for FixedThreadsParallelizer {
    /// Pool bounded by the hardware concurrency.
    fn default() -> Self {
        let limit = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::new(limit)
    }
}

/// Reserves `limit - claimed` threads on construction and returns them on
/// drop. The reservation is a single compare-exchange that raises the counter
/// to the limit, so two sibling regions entering concurrently each observe a
/// consistent remainder and the counter never exceeds the limit.
struct ThreadGuard<'a> {
    claimed: usize,
    counter: &'a AtomicUsize,
}

impl<'a> ThreadGuard<'a> {
    fn claim(pool: &'a FixedThreadsParallelizer) -> Self {
        let counter = &pool.claimed;
        let mut current = counter.load(Ordering::Relaxed);
        loop {
            let wanted = pool.limit.saturating_sub(current);
            match counter.compare_exchange_weak(
                current,
                pool.limit,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    return Self {
                        claimed: wanted,
                        counter,
                    }
                }
                Err(observed) => current = observed,
            }
        }
    }
}

impl Drop for ThreadGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(self.claimed, Ordering::AcqRel);
    }
}

impl Parallelizer for FixedThreadsParallelizer {
    /// Block partition: with `T = 1 + claimed` threads each gets
    /// `length / T` items and the first `length % T` threads one extra.
    /// The caller works the final block, which never takes the remainder.
    fn parallel_for<F>(&self, first: usize, last: usize, body: F)
    where
        F: Fn(usize) + Sync,
    {
        let length = last.saturating_sub(first);
        if length == 0 {
            return;
        }

        let guard = ThreadGuard::claim(self);
        let threads = 1 + guard.claimed;
        let chunk = length / threads;
        let remainder = length % threads;

        let body = &body;
        thread::scope(|scope| {
            let mut start = first;
            for index in 0..threads - 1 {
                let end = start + chunk + usize::from(index < remainder);
                scope.spawn(move || {
                    for i in start..end {
                        body(i);
                    }
                });
                start = end;
            }
            for i in start..last {
                body(i);
            }
        });
    }

    fn parallel_calls(&self, tasks: Vec<Task<'_>>) {
        if tasks.is_empty() {
            return;
        }

        let guard = ThreadGuard::claim(self);
        let fifo = &TaskFifo::new(tasks);
        thread::scope(|scope| {
            for _ in 0..guard.claimed {
                scope.spawn(move || fifo.drain());
            }
            fifo.drain();
        });
    }
}

/// Mutex-guarded task queue drained by the pool workers and the caller.
/// Each task is popped, and therefore executed, at most once.
pub struct TaskFifo<'a> {
    queue: Mutex<VecDeque<Task<'a>>>,
}

impl<'a> TaskFifo<'a> {
    pub fn new(tasks: Vec<Task<'a>>) -> Self {
        Self {
            queue: Mutex::new(tasks.into()),
        }
    }

    pub fn push(&self, task: Task<'a>) {
        self.queue.lock().expect("task queue poisoned").push_back(task);
    }

    pub fn pop(&self) -> Option<Task<'a>> {
        self.queue.lock().expect("task queue poisoned").pop_front()
    }

    /// Runs popped tasks until the queue is empty.
    pub fn drain(&self) {
        while let Some(task) = self.pop() {
            task();
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::sync::atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn parallel_for_visits_every_index_once() {
        let pool = FixedThreadsParallelizer::new(4);
        let visits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();

        pool.parallel_for(0, visits.len(), |i| {
            visits[i].fetch_add(1, Ordering::Relaxed);
        });

        assert!(visits.iter().all(|v| v.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn parallel_for_handles_short_ranges() {
        let pool = FixedThreadsParallelizer::new(8);
        let sum = AtomicUsize::new(0);
        pool.parallel_for(10, 13, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });
        assert_eq!(sum.into_inner(), 10 + 11 + 12);

        let pool = FixedThreadsParallelizer::new(8);
        pool.parallel_for(5, 5, |_| panic!("empty range must not run the body"));
    }

    #[test]
    fn parallel_calls_runs_each_task_once() {
        let pool = FixedThreadsParallelizer::new(4);
        let counter = AtomicUsize::new(0);

        let tasks: Vec<Task> = (0..64)
            .map(|i| {
                let counter = &counter;
                Box::new(move || {
                    counter.fetch_add(i, Ordering::Relaxed);
                }) as Task
            })
            .collect();
        pool.parallel_calls(tasks);

        assert_eq!(counter.into_inner(), (0..64).sum());
    }

    #[test]
    fn counter_returns_to_one_after_each_region() {
        let pool = FixedThreadsParallelizer::new(6);

        pool.parallel_for(0, 100, |_| {});
        assert_eq!(pool.claimed.load(Ordering::Relaxed), 1);

        pool.parallel_calls(vec![Box::new(|| {}), Box::new(|| {})]);
        assert_eq!(pool.claimed.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn nested_regions_run_inline_without_oversubscribing() {
        let pool = FixedThreadsParallelizer::new(3);
        let total = AtomicUsize::new(0);

        let outer: Vec<Task> = (0..2)
            .map(|_| {
                let pool = &pool;
                let total = &total;
                Box::new(move || {
                    // The inner region sees a fully claimed counter and must
                    // still complete all iterations on the entering thread.
                    pool.parallel_for(0, 50, |_| {
                        assert!(pool.claimed.load(Ordering::Relaxed) <= 3);
                        total.fetch_add(1, Ordering::Relaxed);
                    });
                }) as Task
            })
            .collect();
        pool.parallel_calls(outer);

        assert_eq!(total.into_inner(), 100);
        assert_eq!(pool.claimed.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn fifo_pops_in_insertion_order() {
        let order = Mutex::new(Vec::new());
        let fifo = TaskFifo::new(Vec::new());
        for i in 0..5 {
            let order = &order;
            fifo.push(Box::new(move || order.lock().unwrap().push(i)));
        }

        fifo.drain();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
