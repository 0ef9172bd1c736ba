//! Bounded Queue Tests
//!
//! Backpressure semantics of the connection queue: FIFO order, blocking
//! enqueue on full, blocking dequeue on empty, and multi-threaded hand-off.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tuplekv::network::BoundedQueue;

#[test]
fn test_fifo_order() {
    let queue = BoundedQueue::new(4);

    for i in 0..4 {
        queue.enqueue(i);
    }
    for i in 0..4 {
        assert_eq!(queue.dequeue(), i);
    }
}

#[test]
fn test_len_and_capacity() {
    let queue = BoundedQueue::new(3);
    assert_eq!(queue.capacity(), 3);
    assert!(queue.is_empty());

    queue.enqueue(1);
    queue.enqueue(2);
    assert_eq!(queue.len(), 2);

    queue.dequeue();
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_wraparound() {
    // Cursors wrap around the ring; order is preserved across the seam
    let queue = BoundedQueue::new(3);

    queue.enqueue(0);
    queue.enqueue(1);
    assert_eq!(queue.dequeue(), 0);
    queue.enqueue(2);
    queue.enqueue(3);

    assert_eq!(queue.dequeue(), 1);
    assert_eq!(queue.dequeue(), 2);
    assert_eq!(queue.dequeue(), 3);
}

#[test]
fn test_enqueue_blocks_when_full() {
    let queue = Arc::new(BoundedQueue::new(2));
    let passed = Arc::new(AtomicBool::new(false));

    queue.enqueue(1);
    queue.enqueue(2);

    let producer = {
        let queue = Arc::clone(&queue);
        let passed = Arc::clone(&passed);
        thread::spawn(move || {
            // Queue is at capacity: this must block until a dequeue
            queue.enqueue(3);
            passed.store(true, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!passed.load(Ordering::SeqCst), "enqueue did not block on a full queue");
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.dequeue(), 1);
    producer.join().unwrap();
    assert!(passed.load(Ordering::SeqCst));
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_dequeue_blocks_when_empty() {
    let queue = Arc::new(BoundedQueue::new(2));
    let passed = Arc::new(AtomicBool::new(false));

    let consumer = {
        let queue = Arc::clone(&queue);
        let passed = Arc::clone(&passed);
        thread::spawn(move || {
            let value = queue.dequeue();
            passed.store(true, Ordering::SeqCst);
            value
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!passed.load(Ordering::SeqCst), "dequeue did not block on an empty queue");

    queue.enqueue(42);
    assert_eq!(consumer.join().unwrap(), 42);
}

#[test]
fn test_producer_consumer_handoff() {
    // One producer pushing more items than the capacity, several consumers
    // draining; every item arrives exactly once and the bound always holds
    const ITEMS: usize = 200;
    const CONSUMERS: usize = 5;

    let queue = Arc::new(BoundedQueue::new(10));

    // Shutdown uses a single poison value passed along: each exiting
    // consumer re-enqueues it before returning. The not-empty condition is
    // only signaled on the 0→1 transition, so a burst of poisons would wake
    // just one parked consumer and strand the rest; the re-enqueue makes
    // each hand-off its own 0→1 transition.
    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut seen = Vec::new();
                loop {
                    let item = queue.dequeue();
                    if item == usize::MAX {
                        queue.enqueue(usize::MAX);
                        break;
                    }
                    assert!(queue.len() <= queue.capacity());
                    seen.push(item);
                }
                seen
            })
        })
        .collect();

    for i in 0..ITEMS {
        queue.enqueue(i);
    }
    queue.enqueue(usize::MAX);

    let mut all: Vec<usize> = consumers
        .into_iter()
        .flat_map(|c| c.join().unwrap())
        .collect();
    all.sort_unstable();

    assert_eq!(all, (0..ITEMS).collect::<Vec<_>>());
}
