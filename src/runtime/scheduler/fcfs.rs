use super::{ScheduledTask, Scheduler, WorkerId};
use crate::error::Error;
use crate::runtime::queue::BoundedQueue;
use crate::runtime::signal::Signal;
use crate::runtime::task::Task;

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// First-come-first-served scheduler.
///
/// Tasks leave in the exact order they were enqueued. Each dequeued task is
/// assigned the next worker in a fixed rotation `0, 1, …, workers - 1, 0, …`
/// regardless of load, which keeps assignment O(1) and predictable at the
/// cost of balancing when task durations vary widely.
pub struct Fcfs {
    /// Pending tasks, oldest first.
    queue: BoundedQueue<Task>,

    /// Raised on every submission and on close.
    ready: Signal,

    /// Whether submissions are rejected.
    ///
    /// Submitters hold the read side while enqueueing; `close` takes the
    /// write side, so no submission straddles the transition.
    closed: RwLock<bool>,

    /// Worker that receives the next dequeued task.
    cursor: AtomicUsize,

    /// Number of workers assignments rotate over.
    workers: usize,
}

impl Fcfs {
    /// Number of workers this scheduler assigns to.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Maximum number of pending tasks.
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Number of tasks waiting to be dequeued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` once [`close`](Scheduler::close) has been called.
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Claims the next worker in the rotation.
    fn assign(&self, task: Task) -> ScheduledTask {
        let workers = self.workers;
        let worker: WorkerId = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + 1) % workers)
            })
            .unwrap_or_else(|current| current);

        tracing::trace!(worker, "task dequeued");

        ScheduledTask { task, worker }
    }
}

impl Scheduler for Fcfs {
    /// # Panics
    ///
    /// Panics if `workers` or `capacity` is zero. The executor validates both
    /// before constructing its scheduler.
    fn new(workers: usize, capacity: usize) -> Self {
        assert!(workers > 0, "workers must be > 0");
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            queue: BoundedQueue::new(capacity),
            ready: Signal::new(),
            closed: RwLock::new(false),
            cursor: AtomicUsize::new(0),
            workers,
        }
    }

    fn schedule(&self, task: Task) -> Result<(), Error> {
        let closed = self.closed.read();
        if *closed {
            return Err(Error::ShuttingDown);
        }

        self.queue.push(task);
        drop(closed);

        self.ready.notify();
        Ok(())
    }

    fn try_schedule(&self, task: Task) -> Result<(), Error> {
        let closed = self.closed.read();
        if *closed {
            return Err(Error::ShuttingDown);
        }

        if self.queue.try_push(task).is_err() {
            return Err(Error::QueueFull {
                capacity: self.queue.capacity(),
            });
        }
        drop(closed);

        self.ready.notify();
        Ok(())
    }

    fn has_tasks(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next(&self) -> Option<ScheduledTask> {
        loop {
            if let Some(task) = self.queue.try_pop() {
                return Some(self.assign(task));
            }

            // Once closed is observed, every accepted task is already queued.
            if self.is_closed() {
                return self.queue.try_pop().map(|task| self.assign(task));
            }

            self.ready.wait();
        }
    }

    fn close(&self) {
        *self.closed.write() = true;
        self.ready.notify();
    }
}

impl fmt::Debug for Fcfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fcfs")
            .field("workers", &self.workers)
            .field("capacity", &self.queue.capacity())
            .field("pending", &self.queue.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
