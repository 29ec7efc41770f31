use parking_lot::{Condvar, Mutex};

/// An auto-reset readiness event.
///
/// A `Signal` lets a producer tell a sleeping consumer that work is
/// available. Notifications are sticky: a `notify` that happens while
/// nobody is waiting is remembered, and the next [`wait`](Self::wait)
/// returns immediately. Multiple notifications before a wait collapse
/// into one, which is why consumers always drain their queue fully after
/// waking.
pub(crate) struct Signal {
    /// Whether a notification is pending.
    ready: Mutex<bool>,

    /// Condition variable used to park waiters.
    condvar: Condvar,
}

impl Signal {
    /// Creates a signal with no pending notification.
    pub(crate) fn new() -> Self {
        Self {
            ready: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Sets the signal and wakes one waiting thread.
    pub(crate) fn notify(&self) {
        let mut ready = self.ready.lock();
        *ready = true;
        self.condvar.notify_one();
    }

    /// Blocks until the signal is set, then clears it.
    pub(crate) fn wait(&self) {
        let mut ready = self.ready.lock();

        while !*ready {
            self.condvar.wait(&mut ready);
        }

        *ready = false;
    }
}
