//! Debug assertion macros for ring queue invariants.
//!
//! These macros are only active in debug builds (`#[cfg(debug_assertions)]`),
//! so there is zero overhead in release builds.

// =============================================================================
// Bounded Count
// =============================================================================

/// Assert that the number of live elements does not exceed capacity.
///
/// **Invariant**: `0 ≤ len ≤ capacity`
///
/// Used in: `enqueue()` / `enqueue_batch()` after writing
macro_rules! debug_assert_bounded_count {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "bounded count violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// Cursor Consistency
// =============================================================================

/// Assert that the tail cursor sits exactly `len` slots after head.
///
/// **Invariant**: `tail == (head + len) mod capacity`
///
/// Used in: every mutating operation, after cursors move
macro_rules! debug_assert_cursors {
    ($head:expr, $tail:expr, $len:expr, $capacity:expr) => {
        debug_assert!(
            $tail == ($head + $len) % $capacity,
            "cursor consistency violated: head {} + len {} != tail {} (mod {})",
            $head,
            $len,
            $tail,
            $capacity
        )
    };
}

// =============================================================================
// Minimum Capacity
// =============================================================================

/// Assert that a resize target never drops live elements or reaches zero.
///
/// **Invariant**: `capacity ≥ max(len, 1)`
///
/// Used in: `resize()` after clamping the requested capacity
macro_rules! debug_assert_min_capacity {
    ($capacity:expr, $len:expr) => {
        debug_assert!(
            $capacity >= $len.max(1),
            "minimum capacity violated: capacity {} for {} live elements",
            $capacity,
            $len
        )
    };
}

// =============================================================================
// Occupied Slots
// =============================================================================

/// Assert that a slot inside `[head, head + len)` actually holds a value.
///
/// **Invariant**: `storage[(head + i) mod capacity]` is occupied for `i < len`,
/// every other slot is vacant.
///
/// Used in: `dequeue()` and `resize()` before taking a slot's value
macro_rules! debug_assert_occupied {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_some(),
            "occupied slot invariant violated: slot {} is vacant",
            $idx
        )
    };
}

/// Assert that a slot about to be written is vacant.
///
/// Used in: `write_tail()` before storing a new element
macro_rules! debug_assert_vacant {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_none(),
            "occupied slot invariant violated: overwriting live slot {}",
            $idx
        )
    };
}

// =============================================================================
// Re-exports for crate-internal use
// =============================================================================

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_cursors;
pub(crate) use debug_assert_min_capacity;
pub(crate) use debug_assert_occupied;
pub(crate) use debug_assert_vacant;
