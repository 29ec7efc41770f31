//! Error types.
//!
//! Two families of errors exist in the executor:
//! - [`Error`] is returned synchronously by executor, scheduler and task
//!   operations,
//! - [`TaskError`] travels through a [`ResultChannel`](crate::ResultChannel)
//!   and describes why a task could not produce its value.
//!
//! A failure inside a user callable is always a [`TaskError`]; it never
//! surfaces as an [`Error`] and never affects other tasks.

use std::any::Any;
use std::io;

/// Errors raised by the executor machinery itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task was invoked after it had already run (or been moved out of).
    #[error("task has already been executed")]
    AlreadyExecuted,

    /// The executor or scheduler was configured with unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A non-blocking submission found the queue at capacity.
    #[error("queue is full (capacity {capacity})")]
    QueueFull {
        /// Capacity of the rejecting queue.
        capacity: usize,
    },

    /// The scheduler no longer accepts submissions.
    #[error("executor is shutting down")]
    ShuttingDown,

    /// The operating system refused to start a thread.
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Reasons a [`ResultChannel`](crate::ResultChannel) yields no value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The callable panicked. Carries the panic message.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was dropped before it ran, for instance because the
    /// executor was torn down while it was still queued.
    #[error("task was dropped before producing a result")]
    Abandoned,
}

impl TaskError {
    /// Builds a [`TaskError::Panicked`] from a payload caught by
    /// [`std::panic::catch_unwind`].
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => String::from("non-string panic payload"),
            },
        };

        TaskError::Panicked(message)
    }

    /// The panic message, if the task panicked.
    pub fn message(&self) -> Option<&str> {
        match self {
            TaskError::Panicked(message) => Some(message),
            TaskError::Abandoned => None,
        }
    }
}
