//! Error types for queue operations.

use std::fmt;
use thiserror::Error;

/// Errors returned by [`RingQueue`](crate::RingQueue) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue holds no elements.
    #[error("queue is empty")]
    Empty,

    /// Storage for a larger ring could not be allocated. The queue is unchanged.
    #[error("failed to allocate storage for {requested} slots")]
    AllocationFailed { requested: usize },
}

impl QueueError {
    /// Returns `true` if the caller can simply retry later (e.g., after
    /// enqueueing more elements or freeing memory).
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this is the empty-queue condition.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Error returned by [`RingQueue::try_enqueue`](crate::RingQueue::try_enqueue).
///
/// The queue was full and could not grow. The rejected element is handed back
/// so it is not lost.
#[derive(PartialEq, Eq, Error)]
#[error("queue is full and could not grow to {requested} slots")]
pub struct EnqueueError<T> {
    item: T,
    requested: usize,
}

impl<T> EnqueueError<T> {
    pub(crate) fn new(item: T, requested: usize) -> Self {
        Self { item, requested }
    }

    /// Capacity the queue attempted to grow to.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Returns the element that could not be enqueued.
    pub fn into_inner(self) -> T {
        self.item
    }
}

// Manual impl so the error is usable with element types that are not `Debug`.
impl<T> fmt::Debug for EnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnqueueError")
            .field("requested", &self.requested)
            .finish_non_exhaustive()
    }
}

impl<T> From<EnqueueError<T>> for QueueError {
    fn from(err: EnqueueError<T>) -> Self {
        Self::AllocationFailed {
            requested: err.requested,
        }
    }
}
