//! Scheduling policies.
//!
//! A [`Scheduler`] sits between submitters and the executor's master
//! thread. It accepts tasks from any number of threads, decides in which
//! order they leave, and picks the worker each one runs on.
//!
//! The executor only talks to the trait, so a custom policy can replace
//! the default [`Fcfs`] without touching executor or worker code.

mod fcfs;

pub use fcfs::Fcfs;

use crate::error::Error;
use crate::runtime::task::{ResultChannel, Task};

/// Index of a worker inside an executor, in `0..workers`.
pub type WorkerId = usize;

/// A dequeued task paired with the worker it must run on.
///
/// Produced only by [`Scheduler::next`]; the worker is chosen at dequeue
/// time, so assignment order always follows dequeue order.
#[derive(Debug)]
pub struct ScheduledTask {
    /// The task to execute.
    pub task: Task,

    /// Worker the task is assigned to.
    pub worker: WorkerId,
}

/// A scheduling policy.
///
/// Implementations must be safe to share between the master thread and any
/// number of submitting threads.
///
/// # Contract
///
/// - [`next`](Self::next) returns tasks in the policy's order and only ever
///   assigns ids in `0..workers`.
/// - After [`close`](Self::close), submissions fail with
///   [`Error::ShuttingDown`], and `next` returns `None` once every accepted
///   task has been handed out.
pub trait Scheduler: Send + Sync + 'static {
    /// Creates a scheduler for `workers` workers whose pending queue holds at
    /// most `capacity` tasks.
    fn new(workers: usize, capacity: usize) -> Self
    where
        Self: Sized;

    /// Enqueues a task, waiting while the queue is at capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShuttingDown`] once the scheduler is closed.
    fn schedule(&self, task: Task) -> Result<(), Error>;

    /// Enqueues a task without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueFull`] if the queue is at capacity and
    /// [`Error::ShuttingDown`] once the scheduler is closed. The task is
    /// dropped in both cases.
    fn try_schedule(&self, task: Task) -> Result<(), Error>;

    /// Returns `true` if tasks are waiting to be handed out.
    ///
    /// Best effort only; the answer may be stale.
    fn has_tasks(&self) -> bool;

    /// Blocks until a task is available and returns it with its worker.
    ///
    /// Returns `None` once the scheduler is closed and empty.
    fn next(&self) -> Option<ScheduledTask>;

    /// Stops accepting submissions and wakes a thread blocked in
    /// [`next`](Self::next).
    fn close(&self);

    /// Submits `callable` and returns the channel of its result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShuttingDown`] once the scheduler is closed.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let channel = executor.scheduler().spawn(|| 42)?;
    /// assert_eq!(channel.recv(), Ok(42));
    /// ```
    fn spawn<F, R>(&self, callable: F) -> Result<ResultChannel<R>, Error>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
        Self: Sized,
    {
        let (channel, task) = Task::new(callable);
        self.schedule(task)?;

        Ok(channel)
    }

    /// Submits `callable` without waiting for queue space.
    ///
    /// # Errors
    ///
    /// See [`try_schedule`](Self::try_schedule).
    fn try_spawn<F, R>(&self, callable: F) -> Result<ResultChannel<R>, Error>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
        Self: Sized,
    {
        let (channel, task) = Task::new(callable);
        self.try_schedule(task)?;

        Ok(channel)
    }
}
