//! Fork-join parallelism with a fixed thread budget.
//!
//! The [`Parallelizer`] capability abstracts over how a loop or a batch of
//! independent tasks is spread across threads. Transform kernels take any
//! implementation, so the same code runs sequentially on an exhausted budget,
//! on a bounded pool of scoped threads, or on rayon's work-sharing pool.

mod fixed;
mod sync_slice;
mod work_sharing;

pub use {
    fixed::{FixedThreadsParallelizer, TaskFifo},
    sync_slice::SyncSlice,
    work_sharing::RayonParallelizer,
};

/// A unit of work for [`Parallelizer::parallel_calls`].
pub type Task<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Schedules independent work items over a bounded number of threads.
///
/// Both operations return only once every scheduled item has completed, and
/// both may run work on the caller's thread. Items must be independent; any
/// execution order is allowed.
pub trait Parallelizer: Sync {
    /// Calls `body(i)` for every `i` in `[first, last)`.
    fn parallel_for<F>(&self, first: usize, last: usize, body: F)
    where
        F: Fn(usize) + Sync;

    /// Runs each task in `tasks` exactly once.
    fn parallel_calls(&self, tasks: Vec<Task<'_>>);
}
