use crate::runtime::scheduler::WorkerId;

use std::cell::Cell;

thread_local! {
    /// Identifier of the worker owning the current thread.
    ///
    /// Set once when a worker thread starts and never changed afterwards.
    /// `None` on every thread that is not a worker.
    static CURRENT_WORKER_ID: Cell<Option<WorkerId>> = const { Cell::new(None) };
}

/// Marks the current thread as the thread of worker `id`.
pub(crate) fn enter_worker(id: WorkerId) {
    CURRENT_WORKER_ID.with(|cell| cell.set(Some(id)));
}

/// Returns the id of the worker executing the calling code.
///
/// Inside a task this is the worker the scheduler assigned the task to.
/// Outside the executor's worker threads it returns `None`.
///
/// # Examples
///
/// ```rust,ignore
/// let channel = executor.scheduler().spawn(foreman::current_worker)?;
/// assert!(channel.recv()?.is_some());
/// assert_eq!(foreman::current_worker(), None);
/// ```
pub fn current_worker() -> Option<WorkerId> {
    CURRENT_WORKER_ID.with(Cell::get)
}
