/// Configuration for a [`RingQueue`](crate::RingQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of slots allocated up front (default: 1, `0` is treated as 1)
    pub initial_capacity: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(initial_capacity: usize, enable_metrics: bool) -> Self {
        Self {
            initial_capacity,
            enable_metrics,
        }
    }

    /// Returns the capacity a queue built from this config starts with.
    ///
    /// A ring needs at least one slot, so a requested capacity of zero is
    /// coerced to 1.
    #[inline]
    pub const fn effective_capacity(&self) -> usize {
        if self.initial_capacity == 0 {
            1
        } else {
            self.initial_capacity
        }
    }

    /// Sets the initial capacity.
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enables or disables metrics collection.
    pub const fn with_metrics(mut self, enable_metrics: bool) -> Self {
        self.enable_metrics = enable_metrics;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 1,
            enable_metrics: false,
        }
    }
}

/// Small queue configuration (16 slots), e.g. per-node work lists
pub const SMALL_QUEUE_CONFIG: Config = Config::new(16, false);

/// Burst configuration (4K slots, metrics on) for event loops that see
/// large bursts followed by a drain
pub const BURST_QUEUE_CONFIG: Config = Config::new(4096, true);
