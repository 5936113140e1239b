use crate::invariants::{
    debug_assert_bounded_count, debug_assert_cursors, debug_assert_min_capacity,
    debug_assert_occupied, debug_assert_vacant,
};
use crate::{Config, EnqueueError, Metrics, QueueError};
use std::collections::TryReserveError;
use std::fmt;
use std::iter::FusedIterator;

// =============================================================================
// STORAGE & CAPACITY POLICY
// =============================================================================
//
// ## Layout
//
// `storage` is a contiguous run of `capacity` slots treated as a circle.
// Live elements occupy the `len` slots starting at `head`, walking forward
// with wrap-around: `(head + i) % capacity` for `i in 0..len`. `tail` is the
// next slot to write and always equals `(head + len) % capacity`. Every slot
// outside the live range is `None`.
//
// ## Growth (100% full)
//
// A single enqueue on a full ring doubles capacity. A batch of `n` doubles
// repeatedly until `len + n` fits and then resizes exactly once, so a large
// batch costs one copy instead of one per doubling.
//
// ## Shrink (25% full)
//
// After every dequeue, if `capacity > 1` and `len <= capacity / 4`, capacity
// halves. Memory is therefore bounded at 4x the live count after a drain,
// and the gap between the two thresholds keeps alternating enqueue/dequeue
// at a boundary from resizing on every call.
//
// ## Resize Protocol
//
// 1. Clamp the target to `max(len, 1)`
// 2. Allocate the new region with `try_reserve_exact` (may fail)
// 3. Only then move live elements into it, oldest first, starting at 0
// 4. Swap the region in, `head = 0`, `tail = len % capacity`
//
// Nothing observable changes before step 2 succeeds. A failed shrink is
// logged and skipped. A failed growth is reported to the caller.
//
// =============================================================================

/// A FIFO queue backed by a growable ring buffer.
///
/// Enqueue and dequeue are amortized O(1). Capacity doubles when the ring is
/// full and halves when occupancy falls to a quarter, so the queue neither
/// reallocates on every push nor retains memory after a burst is drained.
///
/// Dequeued slots are cleared immediately: once an element is handed back to
/// the caller the queue holds no reference to it.
///
/// `RingQueue` is a single-owner container with no internal locking. Wrap it
/// in a `Mutex` or confine it to one task if it must be shared.
#[derive(Clone)]
pub struct RingQueue<T> {
    /// Ring storage; `storage.len()` is the capacity.
    storage: Vec<Option<T>>,
    /// Index of the oldest live element (meaningful only when `len > 0`)
    head: usize,
    /// Index of the next slot to write
    tail: usize,
    /// Number of live elements
    len: usize,
    config: Config,
    metrics: Metrics,
}

impl<T> RingQueue<T> {
    /// Creates an empty queue with a single slot.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty queue with room for `capacity` elements.
    ///
    /// A capacity of zero is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::default().with_initial_capacity(capacity))
    }

    /// Creates an empty queue with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let capacity = config.effective_capacity();

        let mut metrics = Metrics::new();
        if config.enable_metrics {
            metrics.peak_capacity = capacity as u64;
        }

        Self {
            storage: vacant_slots(capacity),
            head: 0,
            tail: 0,
            len: 0,
            config,
            metrics,
        }
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    /// Returns the number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the next enqueue will have to grow the ring.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the configuration this queue was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a snapshot of metrics if enabled.
    pub fn metrics(&self) -> Metrics {
        if self.config.enable_metrics {
            self.metrics
        } else {
            Metrics::default()
        }
    }

    // ---------------------------------------------------------------------
    // ENQUEUE
    // ---------------------------------------------------------------------

    /// Appends an element to the back of the queue, doubling capacity if the
    /// ring is full.
    ///
    /// # Panics
    ///
    /// Panics if the ring is full and storage for twice the capacity cannot
    /// be allocated, like [`Vec::push`]. The queue itself is left intact; use
    /// [`try_enqueue`](Self::try_enqueue) to handle this case instead.
    pub fn enqueue(&mut self, item: T) {
        if let Err(err) = self.try_enqueue(item) {
            panic!("ring queue capacity overflow: {err}");
        }
    }

    /// Appends an element to the back of the queue.
    ///
    /// If the ring is full and cannot grow, the queue is left unchanged and
    /// the element is returned inside the error.
    pub fn try_enqueue(&mut self, item: T) -> Result<(), EnqueueError<T>> {
        if self.is_full() {
            if let Err(requested) = self.grow_for(1) {
                return Err(EnqueueError::new(item, requested));
            }
        }

        self.write_tail(item);
        self.record_enqueued(1);
        Ok(())
    }

    /// Appends every element of `items`, preserving their order, with at
    /// most one resize.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the ring must grow and the new storage cannot be allocated.
    /// Nothing is enqueued in that case.
    pub fn enqueue_batch<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        if let Err(err) = self.try_enqueue_batch(items) {
            panic!("ring queue capacity overflow: {err}");
        }
    }

    /// Fallible version of [`enqueue_batch`](Self::enqueue_batch).
    ///
    /// Space for the whole batch is reserved before anything is written, so
    /// on `QueueError::AllocationFailed` the queue is unchanged.
    ///
    /// The one exception is an iterator that yields more items than its
    /// `len()` reported: the surplus is enqueued one at a time, and if one of
    /// those growths fails the items already written stay in the queue.
    pub fn try_enqueue_batch<I>(&mut self, items: I) -> Result<(), QueueError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let n = items.len();
        if n == 0 {
            return Ok(());
        }

        self.try_reserve(n)?;

        let mut written = 0u64;
        let mut result = Ok(());
        for item in items {
            // `len()` is only a hint; an iterator that yields more than it
            // reported falls back to per-item growth.
            if self.is_full() {
                if let Err(err) = self.try_reserve(1) {
                    result = Err(err);
                    break;
                }
            }
            self.write_tail(item);
            written += 1;
        }

        self.record_enqueued(written);
        result
    }

    /// Ensures room for `additional` more elements without further resizing.
    ///
    /// Capacity is doubled until `len + additional` fits, then the ring is
    /// reallocated once. Does nothing if there is already enough room.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), QueueError> {
        self.grow_for(additional)
            .map_err(|requested| QueueError::AllocationFailed { requested })
    }

    /// Internal: Write one element at `tail`. The caller guarantees a free slot.
    fn write_tail(&mut self, item: T) {
        let capacity = self.capacity();
        let slot = &mut self.storage[self.tail];
        debug_assert_vacant!(slot, self.tail);
        *slot = Some(item);

        self.tail = (self.tail + 1) % capacity;
        self.len += 1;

        debug_assert_bounded_count!(self.len, capacity);
        debug_assert_cursors!(self.head, self.tail, self.len, capacity);
    }

    // ---------------------------------------------------------------------
    // DEQUEUE
    // ---------------------------------------------------------------------

    /// Removes and returns the oldest element.
    ///
    /// Returns `QueueError::Empty` if there is nothing to dequeue. May halve
    /// capacity afterwards if the ring has become sparse.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty);
        }

        let item = self.take_front();
        self.record_dequeued(1);
        self.shrink_if_sparse();

        item.ok_or(QueueError::Empty)
    }

    /// Removes up to `max_items` elements, oldest first.
    ///
    /// Returns fewer than `max_items` (possibly none) when the queue runs
    /// out. Running out is not an error.
    pub fn dequeue_batch(&mut self, max_items: usize) -> Vec<T> {
        let count = max_items.min(self.len);
        let mut batch = Vec::with_capacity(count);

        while batch.len() < count {
            match self.dequeue() {
                Ok(item) => batch.push(item),
                Err(_) => break,
            }
        }

        batch
    }

    /// Returns a reference to the oldest element without removing it.
    pub fn peek(&self) -> Result<&T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty);
        }
        self.storage[self.head].as_ref().ok_or(QueueError::Empty)
    }

    /// Returns a mutable reference to the oldest element without removing it.
    pub fn peek_mut(&mut self) -> Result<&mut T, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty);
        }
        self.storage[self.head].as_mut().ok_or(QueueError::Empty)
    }

    /// Internal: Move the head element out and advance. No shrink check.
    fn take_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let capacity = self.capacity();
        let item = self.storage[self.head].take();
        debug_assert_occupied!(item, self.head);

        self.head = (self.head + 1) % capacity;
        self.len -= 1;

        debug_assert_cursors!(self.head, self.tail, self.len, capacity);
        item
    }

    // ---------------------------------------------------------------------
    // RESIZE
    // ---------------------------------------------------------------------

    /// Internal: Grow so that `additional` more elements fit. On failure
    /// returns the capacity that could not be reached.
    fn grow_for(&mut self, additional: usize) -> Result<(), usize> {
        let Some(required) = self.len.checked_add(additional) else {
            return Err(self.growth_failed(usize::MAX, &"element count overflows usize"));
        };
        if required <= self.capacity() {
            return Ok(());
        }

        let Some(target) = self.doubled_capacity(required) else {
            return Err(self.growth_failed(required, &"capacity overflows usize"));
        };

        self.resize(target)
            .map_err(|err| self.growth_failed(target, &err))
    }

    /// Internal: Smallest `capacity * 2^k` that is at least `required`.
    fn doubled_capacity(&self, required: usize) -> Option<usize> {
        let mut capacity = self.capacity();
        while capacity < required {
            capacity = capacity.checked_mul(2)?;
        }
        Some(capacity)
    }

    /// Internal: Halve capacity if occupancy is at or below one quarter.
    fn shrink_if_sparse(&mut self) {
        let capacity = self.capacity();
        if capacity <= 1 || self.len > capacity / 4 {
            return;
        }

        let target = capacity / 2;
        if let Err(err) = self.resize(target) {
            self.record_failed_resize();
            tracing::warn!(
                capacity,
                target,
                len = self.len,
                error = %err,
                "ring queue shrink aborted, keeping current storage"
            );
        }
    }

    /// Internal: Reallocate the ring to `new_capacity` slots, oldest element
    /// first. Leaves the queue untouched if allocation fails.
    fn resize(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        let new_capacity = new_capacity.max(self.len).max(1);
        debug_assert_min_capacity!(new_capacity, self.len);

        let old_capacity = self.capacity();
        let mut fresh = Vec::new();
        fresh.try_reserve_exact(new_capacity)?;

        for i in 0..self.len {
            let idx = (self.head + i) % old_capacity;
            let slot = self.storage[idx].take();
            debug_assert_occupied!(slot, idx);
            fresh.push(slot);
        }
        fresh.resize_with(new_capacity, || None);

        self.storage = fresh;
        self.head = 0;
        self.tail = self.len % new_capacity;
        debug_assert_cursors!(self.head, self.tail, self.len, new_capacity);

        if self.config.enable_metrics {
            self.metrics.record_resize(old_capacity, new_capacity);
        }
        tracing::trace!(
            old_capacity,
            new_capacity,
            len = self.len,
            "ring queue resized"
        );

        Ok(())
    }

    /// Internal: Record and log a growth that could not be satisfied.
    fn growth_failed(&mut self, requested: usize, reason: &dyn fmt::Display) -> usize {
        self.record_failed_resize();
        tracing::error!(
            capacity = self.capacity(),
            requested,
            len = self.len,
            reason = %reason,
            "ring queue growth aborted, existing elements are intact"
        );
        requested
    }

    // ---------------------------------------------------------------------
    // ITERATION & LIFECYCLE
    // ---------------------------------------------------------------------

    /// Returns a front-to-back iterator over the queued elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            storage: &self.storage,
            pos: self.head,
            remaining: self.len,
        }
    }

    /// Drops every element and returns to the configured initial capacity.
    ///
    /// Dropped elements count as dequeued in the metrics.
    pub fn clear(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = self.config.effective_capacity();
        let dropped = self.len as u64;

        self.storage = vacant_slots(new_capacity);
        self.head = 0;
        self.tail = 0;
        self.len = 0;

        self.record_dequeued(dropped);
        if self.config.enable_metrics && old_capacity != new_capacity {
            self.metrics.record_resize(old_capacity, new_capacity);
        }
    }

    // ---------------------------------------------------------------------
    // METRICS
    // ---------------------------------------------------------------------

    #[inline]
    fn record_enqueued(&mut self, n: u64) {
        if self.config.enable_metrics {
            self.metrics.add_enqueued(n);
        }
    }

    #[inline]
    fn record_dequeued(&mut self, n: u64) {
        if self.config.enable_metrics {
            self.metrics.add_dequeued(n);
        }
    }

    fn record_failed_resize(&mut self) {
        if self.config.enable_metrics {
            self.metrics.record_failed_resize();
        }
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RingQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        // Best effort: if the up-front reservation fails, per-item growth
        // below reports the failure.
        if let Some(required) = self.len.checked_add(lower) {
            if required > self.capacity() {
                let target = self.doubled_capacity(required);
                if let Some(Err(err)) = target.map(|target| self.resize(target)) {
                    tracing::debug!(lower, error = %err, "extend could not reserve up front");
                }
            }
        }
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> IntoIterator for RingQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a RingQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Internal: Allocate `capacity` vacant slots.
fn vacant_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut storage = Vec::with_capacity(capacity);
    storage.resize_with(capacity, || None);
    storage
}

// ---------------------------------------------------------------------
// ITERATORS
// ---------------------------------------------------------------------

/// Borrowing iterator over a [`RingQueue`], oldest element first.
pub struct Iter<'a, T> {
    storage: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

// Manual impl: cloning the iterator never clones elements, so no `T: Clone`.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            pos: self.pos,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let item = self.storage[self.pos].as_ref();
        self.pos = (self.pos + 1) % self.storage.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`RingQueue`] in FIFO order.
///
/// Draining does not shrink the ring; the storage is released when the
/// iterator is dropped.
pub struct IntoIter<T> {
    queue: RingQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.take_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
