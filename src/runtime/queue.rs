use crossbeam_channel::{Receiver, Sender, TrySendError};
use crossbeam_utils::Backoff;

/// A bounded FIFO queue shared between threads.
///
/// `BoundedQueue` is the hand-off primitive used by both the scheduler
/// (many submitters, one master) and every worker (master in, worker
/// out). It is backed by a bounded `crossbeam` channel, which is safe for
/// any number of concurrent producers and consumers.
///
/// The queue owns both ends of the channel, so it can never become
/// disconnected while it is alive.
pub(crate) struct BoundedQueue<T> {
    /// Producer side.
    sender: Sender<T>,

    /// Consumer side.
    receiver: Receiver<T>,

    /// Fixed number of slots.
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue holding at most `capacity` items.
    ///
    /// `capacity` must be non-zero; a zero-capacity channel would turn every
    /// push into a rendezvous.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "queue capacity must be > 0");

        let (sender, receiver) = crossbeam_channel::bounded(capacity);

        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Attempts to push an item to the back of the queue.
    ///
    /// Returns the item back if the queue is full.
    pub(crate) fn try_push(&self, item: T) -> Result<(), T> {
        match self.sender.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(item)) | Err(TrySendError::Disconnected(item)) => Err(item),
        }
    }

    /// Pushes an item, spinning while the queue is at capacity.
    ///
    /// The caller backs off with [`Backoff::snooze`], which spins briefly
    /// and then yields the thread between attempts.
    pub(crate) fn push(&self, mut item: T) {
        let backoff = Backoff::new();

        loop {
            match self.try_push(item) {
                Ok(()) => return,
                Err(rejected) => {
                    item = rejected;
                    backoff.snooze();
                }
            }
        }
    }

    /// Pops the item at the front of the queue, if any.
    pub(crate) fn try_pop(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Returns `true` if the queue currently holds no items.
    ///
    /// The answer may be stale by the time the caller acts on it.
    pub(crate) fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Number of items currently queued.
    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Maximum number of items the queue can hold.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::BoundedQueue;

    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_queue_is_fifo() {
        let queue = BoundedQueue::new(4);

        for i in 0..4 {
            assert!(queue.try_push(i).is_ok());
        }

        let drained: Vec<_> = std::iter::from_fn(|| queue.try_pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_rejects_when_full() {
        let queue = BoundedQueue::new(2);

        assert!(queue.try_push(1).is_ok());
        assert!(queue.try_push(2).is_ok());
        assert_eq!(queue.try_push(3), Err(3));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.capacity(), 2);
    }

    #[test]
    fn test_blocking_push_waits_for_consumer() {
        let queue = Arc::new(BoundedQueue::new(1));
        queue.push(0);

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 1..=100 {
                    queue.push(i);
                }
            })
        };

        let mut received = Vec::new();
        while received.len() < 101 {
            if let Some(item) = queue.try_pop() {
                received.push(item);
            } else {
                thread::yield_now();
            }
        }

        producer.join().unwrap();
        assert_eq!(received, (0..=100).collect::<Vec<_>>());
    }
}
