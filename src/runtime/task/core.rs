use super::handle::{self, ResultChannel};
use crate::error::{Error, TaskError};

use std::cell::UnsafeCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

/// Type-erased body of a task.
type Callable = Box<dyn FnOnce() + Send + 'static>;

/// A unit of work that runs at most once.
///
/// A `Task` wraps a single callable together with the write half of its
/// [`ResultChannel`]. Whoever holds the task may invoke it with
/// [`run`](Self::run); only the first invocation executes the callable,
/// every other attempt fails with [`Error::AlreadyExecuted`], even when
/// several threads race on the same task.
///
/// Tasks are never cloned. Ownership moves from the submitter to the
/// scheduler, then to a worker.
pub struct Task {
    /// The callable, present until the winning invocation takes it.
    ///
    /// Wrapped in `UnsafeCell` so the winner of the `executed` swap can take
    /// it through a shared reference.
    callable: UnsafeCell<Option<Callable>>,

    /// Set once the task has been invoked or moved out of.
    executed: AtomicBool,
}

// Safety: `callable` is only accessed by the thread that flips `executed`
// from `false` to `true`, or through `&mut self`. No two threads can reach
// the cell at the same time.
unsafe impl Sync for Task {}

impl Task {
    /// Wraps `callable` into a task and returns it with its result channel.
    ///
    /// Arguments are captured by the closure. The returned task has not run
    /// yet; the channel resolves once it does.
    ///
    /// A panic inside `callable` is caught and delivered through the channel
    /// as [`TaskError::Panicked`].
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let (channel, task) = Task::new(|| 42);
    /// task.run()?;
    /// assert_eq!(channel.recv(), Ok(42));
    /// ```
    pub fn new<F, R>(callable: F) -> (ResultChannel<R>, Task)
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (promise, channel) = handle::channel();

        let body = move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(callable))
                .map_err(TaskError::from_panic);
            promise.fulfill(outcome);
        };

        let task = Task {
            callable: UnsafeCell::new(Some(Box::new(body))),
            executed: AtomicBool::new(false),
        };

        (channel, task)
    }

    /// A task that can never run. Left behind by [`take`](Self::take).
    fn spent() -> Self {
        Task {
            callable: UnsafeCell::new(None),
            executed: AtomicBool::new(true),
        }
    }

    /// Executes the wrapped callable.
    ///
    /// The executed flag is claimed with an atomic swap, so exactly one
    /// caller wins. The winner runs the callable and writes its outcome into
    /// the result channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExecuted`] if the task already ran, is running
    /// on another thread, or was moved out of with [`take`](Self::take).
    pub fn run(&self) -> Result<(), Error> {
        if self.executed.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyExecuted);
        }

        // Safety: winning the swap above grants exclusive access to the cell.
        let callable = unsafe { (*self.callable.get()).take() };

        match callable {
            Some(callable) => {
                callable();
                Ok(())
            }
            None => Err(Error::AlreadyExecuted),
        }
    }

    /// Returns `true` if the task has not been invoked yet.
    ///
    /// This is a snapshot; a concurrent [`run`](Self::run) may claim the task
    /// right after. Never use it to decide whether running is safe.
    pub fn is_executable(&self) -> bool {
        !self.executed.load(Ordering::Acquire)
    }

    /// Moves the callable and its executed state into a new task.
    ///
    /// `self` is left permanently non-executable.
    pub fn take(&mut self) -> Task {
        std::mem::replace(self, Task::spent())
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("executable", &self.is_executable())
            .finish()
    }
}
