//! Bounded Connection Queue
//!
//! Fixed-capacity FIFO hand-off between the acceptor and the worker pool,
//! implemented as a classic monitor: one mutex, two wait conditions, a
//! circular buffer with independent producer and consumer cursors and a
//! separate occupancy counter.
//!
//! ## Signaling policy
//!
//! Edge-triggered: `not_empty` is signaled only on the 0 → 1 occupancy
//! transition, `not_full` only on the capacity → capacity−1 transition, so a
//! single parked thread is woken per transition. Waiters therefore re-check
//! their condition in a loop before proceeding.

use parking_lot::{Condvar, Mutex};

/// A blocking bounded FIFO queue
pub struct BoundedQueue<T> {
    inner: Mutex<Ring<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

/// Circular buffer state, all guarded by the one mutex
struct Ring<T> {
    slots: Vec<Option<T>>,
    /// Insertion cursor (producer side)
    producer_pos: usize,
    /// Consumption cursor (consumer side)
    consumer_pos: usize,
    /// Occupied slot count; the queue invariant is 0 <= len <= capacity
    len: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            inner: Mutex::new(Ring {
                slots,
                producer_pos: 0,
                consumer_pos: 0,
                len: 0,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Append an entry, blocking while the queue is at capacity
    pub fn enqueue(&self, entry: T) {
        let mut ring = self.inner.lock();

        while ring.len == self.capacity {
            self.not_full.wait(&mut ring);
        }

        let pos = ring.producer_pos;
        ring.slots[pos] = Some(entry);
        ring.producer_pos = (pos + 1) % self.capacity;
        ring.len += 1;

        if ring.len == 1 {
            self.not_empty.notify_one();
        }
    }

    /// Remove the oldest entry, blocking while the queue is empty
    pub fn dequeue(&self) -> T {
        let mut ring = self.inner.lock();

        while ring.len == 0 {
            self.not_empty.wait(&mut ring);
        }

        let pos = ring.consumer_pos;
        let entry = ring.slots[pos].take().expect("occupied slot");
        ring.consumer_pos = (pos + 1) % self.capacity;
        ring.len -= 1;

        if ring.len == self.capacity - 1 {
            self.not_full.notify_one();
        }

        entry
    }

    /// Current occupancy (test/diagnostic use; racy by nature)
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Whether the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
