//! RingQueue - Growable FIFO Queue on a Ring Buffer
//!
//! A generic first-in-first-out queue whose storage is a single contiguous
//! ring. Head and tail wrap around instead of shifting elements, and the ring
//! resizes itself: it doubles when full and halves when occupancy drops to a
//! quarter.
//!
//! # Key Features
//!
//! - Amortized O(1) `enqueue` / `dequeue`
//! - Batch enqueue with a single resize for the whole batch
//! - Batch dequeue that returns what is available instead of failing
//! - Dequeued slots are cleared, so the queue never keeps an element alive
//! - Fallible `try_*` variants that leave the queue intact on allocation failure
//!
//! The queue is a plain single-owner container: no locking, no blocking.
//!
//! # Example
//!
//! ```
//! use ringqueue_rs::{QueueError, RingQueue};
//!
//! let mut queue = RingQueue::new();
//! queue.enqueue(1);
//! queue.enqueue_batch([2, 3, 4]);
//!
//! assert_eq!(queue.len(), 4);
//! assert_eq!(queue.peek(), Ok(&1));
//! assert_eq!(queue.dequeue(), Ok(1));
//!
//! // Asking for more than is queued returns what is there
//! assert_eq!(queue.dequeue_batch(10), vec![2, 3, 4]);
//! assert_eq!(queue.dequeue(), Err(QueueError::Empty));
//! ```

mod config;
mod error;
mod invariants;
mod metrics;
mod queue;

pub use config::{Config, BURST_QUEUE_CONFIG, SMALL_QUEUE_CONFIG};
pub use error::{EnqueueError, QueueError};
pub use metrics::Metrics;
pub use queue::{IntoIter, Iter, RingQueue};
