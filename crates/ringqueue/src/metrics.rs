/// Optional metrics for monitoring queue behavior.
///
/// Counters are only updated when [`Config::enable_metrics`](crate::Config)
/// is set. A disabled queue reports all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub enqueued: u64,
    pub dequeued: u64,
    pub grows: u64,
    pub shrinks: u64,
    /// Resizes abandoned because the new storage could not be allocated
    pub failed_resizes: u64,
    /// Largest capacity the queue has reached
    pub peak_capacity: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn add_enqueued(&mut self, n: u64) {
        self.enqueued += n;
    }

    #[inline]
    pub(crate) fn add_dequeued(&mut self, n: u64) {
        self.dequeued += n;
    }

    pub(crate) fn record_resize(&mut self, old_capacity: usize, new_capacity: usize) {
        if new_capacity > old_capacity {
            self.grows += 1;
        } else {
            self.shrinks += 1;
        }
        self.peak_capacity = self.peak_capacity.max(new_capacity as u64);
    }

    pub(crate) fn record_failed_resize(&mut self) {
        self.failed_resizes += 1;
    }

    /// Number of elements currently held according to the counters.
    pub fn in_flight(&self) -> u64 {
        self.enqueued - self.dequeued
    }
}
