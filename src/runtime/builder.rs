use super::Executor;
use super::scheduler::{Fcfs, Scheduler};
use crate::error::Error;

use std::thread;

/// Smallest thread count an executor accepts: one master, one worker.
pub const MIN_THREADS: usize = 2;

/// Executor configuration.
///
/// Both values default to the platform's available parallelism, as reported
/// by [`std::thread::available_parallelism`]. The thread count never
/// defaults below [`MIN_THREADS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Total number of threads, master included.
    pub threads: usize,

    /// Slots in the scheduler queue and in every worker queue.
    pub queue_capacity: usize,
}

impl Config {
    /// Checks that the configuration can build an executor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if fewer than
    /// [`MIN_THREADS`] threads or a zero queue capacity are requested.
    pub fn validate(&self) -> Result<(), Error> {
        if self.threads < MIN_THREADS {
            return Err(Error::InvalidConfiguration(format!(
                "threads must be >= {MIN_THREADS}, got {}",
                self.threads
            )));
        }

        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "queue_capacity must be > 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Number of worker threads, i.e. every thread but the master.
    pub fn workers(&self) -> usize {
        self.threads.saturating_sub(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        let parallelism = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(MIN_THREADS);

        Self {
            threads: parallelism.max(MIN_THREADS),
            queue_capacity: parallelism,
        }
    }
}

/// Builder for configuring and creating an executor.
///
/// # Examples
///
/// ```rust,ignore
/// let executor = ExecutorBuilder::new()
///     .threads(4)
///     .queue_capacity(64)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutorBuilder {
    config: Config,
}

impl ExecutorBuilder {
    /// Creates a builder with the default [`Config`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of threads, master included.
    ///
    /// Values below [`MIN_THREADS`] are rejected by [`build`](Self::build).
    pub fn threads(mut self, n: usize) -> Self {
        self.config.threads = n;
        self
    }

    /// Sets the capacity of the scheduler queue and of each worker queue.
    ///
    /// Zero is rejected by [`build`](Self::build).
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds an executor driven by the default [`Fcfs`] scheduler.
    ///
    /// # Errors
    ///
    /// See [`build_with`](Self::build_with).
    pub fn build(self) -> Result<Executor<Fcfs>, Error> {
        self.build_with::<Fcfs>()
    }

    /// Builds an executor driven by scheduler `S`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid [`Config`] and
    /// [`Error::Spawn`] if a thread cannot be started.
    pub fn build_with<S: Scheduler>(self) -> Result<Executor<S>, Error> {
        Executor::with_config(self.config)
    }
}
