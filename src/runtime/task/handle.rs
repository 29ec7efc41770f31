use crate::error::TaskError;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::fmt;
use std::time::Duration;

/// Outcome stored in a result channel.
pub(crate) type Outcome<T> = Result<T, TaskError>;

/// Creates a connected one-shot pair.
pub(crate) fn channel<T>() -> (Promise<T>, ResultChannel<T>) {
    let (sender, receiver) = crossbeam_channel::bounded(1);

    (Promise { sender }, ResultChannel { receiver })
}

/// The write half of a one-shot result channel.
///
/// A `Promise` is owned by the task closure and consumed by
/// [`fulfill`](Self::fulfill), so at most one outcome can ever be written.
/// Dropping it unfulfilled disconnects the channel and the reader sees
/// [`TaskError::Abandoned`].
pub(crate) struct Promise<T> {
    sender: Sender<Outcome<T>>,
}

impl<T> Promise<T> {
    /// Writes the outcome of the task.
    ///
    /// The reader may already be gone; the outcome is then discarded.
    pub(crate) fn fulfill(self, outcome: Outcome<T>) {
        let _ = self.sender.send(outcome);
    }
}

/// A handle to the eventual result of a submitted task.
///
/// A `ResultChannel` is returned by [`Scheduler::spawn`](crate::Scheduler::spawn)
/// and [`Task::new`](crate::Task::new). It yields exactly one outcome: the
/// callable's return value, or a [`TaskError`] if the callable panicked or
/// the task was discarded before running.
///
/// Reading consumes the channel, so an outcome can be observed only once.
/// Dropping the channel does **not** cancel the task; it only discards the
/// ability to observe its result.
pub struct ResultChannel<T> {
    receiver: Receiver<Outcome<T>>,
}

impl<T> ResultChannel<T> {
    /// Blocks the current thread until the task has produced its outcome.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let channel = executor.scheduler().spawn(|| 6 * 7)?;
    /// assert_eq!(channel.recv(), Ok(42));
    /// ```
    pub fn recv(self) -> Result<T, TaskError> {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::Abandoned),
        }
    }

    /// Returns the outcome if it is already available.
    ///
    /// If the task has not finished yet, the channel is handed back so the
    /// caller can try again later.
    pub fn try_recv(self) -> Result<Result<T, TaskError>, Self> {
        match self.receiver.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(TryRecvError::Disconnected) => Ok(Err(TaskError::Abandoned)),
            Err(TryRecvError::Empty) => Err(self),
        }
    }

    /// Waits at most `timeout` for the outcome.
    ///
    /// On timeout the channel is handed back; the task keeps running and the
    /// caller may wait again.
    pub fn recv_timeout(self, timeout: Duration) -> Result<Result<T, TaskError>, Self> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Ok(outcome),
            Err(RecvTimeoutError::Disconnected) => Ok(Err(TaskError::Abandoned)),
            Err(RecvTimeoutError::Timeout) => Err(self),
        }
    }

    /// Returns `true` if an outcome is waiting to be read.
    pub fn is_ready(&self) -> bool {
        !self.receiver.is_empty()
    }
}

impl<T> fmt::Debug for ResultChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultChannel")
            .field("ready", &self.is_ready())
            .finish()
    }
}
