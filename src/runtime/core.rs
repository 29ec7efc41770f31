use super::builder::{Config, ExecutorBuilder};
use super::scheduler::{Fcfs, ScheduledTask, Scheduler};
use super::worker::Worker;
use crate::error::Error;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Lifecycle of an [`Executor`].
///
/// Transitions only move forward: `Running → Stopping → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    /// Threads are live and submissions are accepted.
    Running,

    /// Submissions are rejected; queued and in-flight work still drains.
    Stopping,

    /// Every thread has been joined.
    Stopped,
}

/// A pool of worker threads fed by a scheduler.
///
/// The `Executor` is responsible for:
/// - spawning one worker thread per worker and a master thread,
/// - moving tasks from the scheduler to the workers it picks,
/// - draining queued work and joining every thread on shutdown.
///
/// An executor built with `N` threads runs `N - 1` workers; the remaining
/// thread is the master. All submissions go through
/// [`scheduler`](Self::scheduler).
///
/// Dropping the executor performs the same graceful shutdown as
/// [`shutdown`](Self::shutdown).
///
/// # Examples
///
/// ```rust,ignore
/// use foreman::{Executor, Scheduler};
///
/// let executor = Executor::new(4)?;
/// let answer = executor.scheduler().spawn(|| 42)?;
/// assert_eq!(answer.recv(), Ok(42));
/// ```
pub struct Executor<S: Scheduler = Fcfs> {
    /// Scheduler shared with the master thread.
    scheduler: Arc<S>,

    /// Workers, indexed by worker id.
    workers: Arc<[Worker]>,

    /// Join handle of the master thread.
    master: Option<JoinHandle<()>>,

    /// Shutdown flag shared with the master thread.
    stop: Arc<AtomicBool>,

    /// Current lifecycle state.
    state: ExecutorState,

    /// Configuration the executor was built with.
    config: Config,
}

impl Executor {
    /// Creates an executor with `threads` threads and the [`Fcfs`]
    /// scheduler. Queue capacity takes its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `threads < 2` and
    /// [`Error::Spawn`] if a thread cannot be started.
    pub fn new(threads: usize) -> Result<Self, Error> {
        Self::with_scheduler(threads)
    }

    /// Returns a builder for fine-grained configuration.
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }
}

impl<S: Scheduler> Executor<S> {
    /// Creates an executor with `threads` threads driven by scheduler `S`.
    ///
    /// # Errors
    ///
    /// See [`Executor::new`].
    pub fn with_scheduler(threads: usize) -> Result<Self, Error> {
        Self::with_config(Config {
            threads,
            ..Config::default()
        })
    }

    /// Creates an executor from a full configuration.
    ///
    /// This method:
    /// - validates the configuration,
    /// - creates the scheduler for `threads - 1` workers,
    /// - spawns the worker threads,
    /// - spawns the master thread.
    ///
    /// Workers already started are shut down again if a later thread fails
    /// to spawn.
    pub(crate) fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;

        let workers = config.workers();
        let scheduler = Arc::new(S::new(workers, config.queue_capacity));

        let workers: Arc<[Worker]> = (0..workers)
            .map(|id| Worker::spawn(id, config.queue_capacity))
            .collect::<Result<Vec<_>, _>>()?
            .into();

        let stop = Arc::new(AtomicBool::new(false));

        let master = {
            let scheduler = scheduler.clone();
            let workers = workers.clone();
            let stop = stop.clone();

            thread::Builder::new()
                .name("foreman-master".to_owned())
                .spawn(move || distribute(&*scheduler, &workers, &stop))?
        };

        tracing::info!(
            threads = config.threads,
            workers = workers.len(),
            capacity = config.queue_capacity,
            "executor started"
        );

        Ok(Self {
            scheduler,
            workers,
            master: Some(master),
            stop,
            state: ExecutorState::Running,
            config,
        })
    }

    /// The scheduler, through which every task is submitted.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExecutorState {
        self.state
    }

    /// Configuration the executor was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shuts the executor down gracefully.
    ///
    /// This performs the following steps:
    /// 1. Closes the scheduler, which rejects new submissions and wakes the
    ///    master if it is waiting for work, then sets the stop flag
    /// 2. Joins the master once every queued task has been handed out
    /// 3. Shuts down each worker, which drains its queue before exiting
    ///
    /// When this returns, every accepted task has run and resolved its
    /// result channel. Calling it again does nothing.
    pub fn shutdown(&mut self) {
        if self.state == ExecutorState::Stopped {
            return;
        }

        self.state = ExecutorState::Stopping;
        tracing::debug!("executor stopping");

        // Close first: once `stop` is visible to the master, every accepted
        // submission is already in the scheduler queue.
        self.scheduler.close();
        self.stop.store(true, Ordering::Release);

        if let Some(master) = self.master.take() {
            if master.join().is_err() {
                tracing::error!("master thread panicked");
            }
        }

        for worker in self.workers.iter() {
            worker.shutdown();
        }

        self.state = ExecutorState::Stopped;
        tracing::info!("executor stopped");
    }
}

impl<S: Scheduler> Drop for Executor<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Master loop: moves tasks from the scheduler to their workers until the
/// executor stops and the scheduler is drained.
fn distribute<S: Scheduler>(scheduler: &S, workers: &[Worker], stop: &AtomicBool) {
    tracing::debug!("master started");

    let mut dispatched = 0usize;

    while !stop.load(Ordering::Acquire) || scheduler.has_tasks() {
        let Some(ScheduledTask { task, worker }) = scheduler.next() else {
            break;
        };

        let target = match workers.get(worker) {
            Some(target) => target,
            None => {
                let fallback = &workers[worker % workers.len()];
                tracing::error!(
                    worker,
                    fallback = fallback.id(),
                    "scheduler assigned an unknown worker"
                );
                fallback
            }
        };

        tracing::trace!(worker = target.id(), "dispatching task");
        target.assign(task);
        dispatched += 1;
    }

    tracing::debug!(dispatched, "master stopped");
}
