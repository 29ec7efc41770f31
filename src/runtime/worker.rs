use crate::error::Error;
use crate::runtime::context::enter_worker;
use crate::runtime::queue::BoundedQueue;
use crate::runtime::scheduler::WorkerId;
use crate::runtime::signal::Signal;
use crate::runtime::task::Task;

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// State shared between a worker handle and its thread.
struct Shared {
    /// Tasks assigned to this worker, oldest first.
    queue: BoundedQueue<Task>,

    /// Raised whenever new tasks are assigned, and once more on shutdown.
    ready: Signal,

    /// Set when the worker must exit after its next drain.
    stop: AtomicBool,
}

/// A worker thread in the executor.
///
/// A `Worker` owns a bounded queue and a dedicated thread. The master
/// thread [`assign`](Self::assign)s tasks to it; the thread sleeps until
/// signalled, then drains its queue completely, running tasks in the order
/// they were assigned.
///
/// Dropping a worker (or calling [`shutdown`](Self::shutdown)) lets the
/// thread drain whatever is still queued before it exits.
pub(crate) struct Worker {
    /// Identifier of the worker, also its index in the executor.
    id: WorkerId,

    /// Queue, signal and stop flag shared with the thread.
    shared: Arc<Shared>,

    /// Handle of the worker thread, taken on shutdown.
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Worker {
    /// Starts a worker thread with a queue of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the thread cannot be created.
    pub(crate) fn spawn(id: WorkerId, capacity: usize) -> Result<Self, Error> {
        let shared = Arc::new(Shared {
            queue: BoundedQueue::new(capacity),
            ready: Signal::new(),
            stop: AtomicBool::new(false),
        });

        let thread = {
            let shared = shared.clone();
            thread::Builder::new()
                .name(format!("foreman-worker-{id}"))
                .spawn(move || run(id, &shared))?
        };

        Ok(Self {
            id,
            shared,
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Identifier of this worker.
    pub(crate) fn id(&self) -> WorkerId {
        self.id
    }

    /// Hands a task to this worker.
    ///
    /// Spins while the worker's queue is full, then wakes the worker.
    pub(crate) fn assign(&self, task: Task) {
        self.shared.queue.push(task);
        self.shared.ready.notify();
    }

    /// Stops the worker and waits for its thread to exit.
    ///
    /// Every task assigned before this call is executed first. Calling it
    /// more than once is harmless.
    pub(crate) fn shutdown(&self) {
        let Some(thread) = self.thread.lock().take() else {
            return;
        };

        self.shared.stop.store(true, Ordering::Release);
        self.shared.ready.notify();

        if thread.join().is_err() {
            tracing::error!(worker = self.id, "worker thread panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Runs the worker loop.
///
/// The stop flag is read *before* draining: once it is observed, every task
/// assigned before shutdown is already in the queue, so the drain that
/// follows is the last one needed.
fn run(id: WorkerId, shared: &Shared) {
    enter_worker(id);
    tracing::debug!(worker = id, "worker started");

    let mut executed = 0usize;

    loop {
        shared.ready.wait();

        let stopping = shared.stop.load(Ordering::Acquire);

        while let Some(task) = shared.queue.try_pop() {
            match task.run() {
                Ok(()) => executed += 1,
                Err(err) => tracing::error!(worker = id, error = %err, "skipping task"),
            }
        }

        if stopping {
            break;
        }
    }

    tracing::debug!(worker = id, executed, "worker stopped");
}
