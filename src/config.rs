//! Runtime configuration of the busy wait

/// Default time between two samples of the busy line
pub const DEFAULT_BUSY_POLL_INTERVAL_US: u32 = 1_000;

/// Default upper bound for a single busy wait
///
/// A global refresh of the larger panels takes several seconds at low
/// temperatures.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 60_000;

/// Settings of a [`Epd`](crate::cog::Epd) that are not tied to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Number of us the idle loop sleeps between two samples of the busy line.
    ///
    /// Setting it to 0 implies busy waiting.
    pub busy_poll_interval_us: u32,
    /// Maximum time a single busy wait may take before
    /// [`ErrorKind::DeviceNotResponding`](crate::error::ErrorKind::DeviceNotResponding)
    /// is returned.
    ///
    /// `None` waits forever.
    pub busy_timeout_ms: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            busy_poll_interval_us: DEFAULT_BUSY_POLL_INTERVAL_US,
            busy_timeout_ms: Some(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Sets the time between two samples of the busy line
    pub const fn with_busy_poll_interval_us(mut self, interval_us: u32) -> Self {
        self.busy_poll_interval_us = interval_us;
        self
    }

    /// Sets the busy timeout, `None` disables it
    pub const fn with_busy_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// The busy timeout in us
    pub(crate) fn busy_timeout_us(&self) -> Option<u64> {
        self.busy_timeout_ms.map(|ms| u64::from(ms) * 1_000)
    }
}
