//! Branch-and-bound configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for [`BnbRunner`](super::BnbRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_loadout::bnb::BnbConfig;
///
/// let config = BnbConfig::default()
///     .with_top_n(3)
///     .with_time_limit(Duration::from_secs(2))
///     .with_presort(false);
/// assert_eq!(config.top_n, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Maximum number of results kept.
    pub top_n: usize,

    /// Hard wall-clock ceiling for one search.
    ///
    /// Combined with any caller deadline; whichever comes first stops the
    /// search, which then returns the results collected so far.
    pub time_limit: Duration,

    /// Tolerance for `==` constraints and for equality feasibility ranges.
    pub tolerance: f64,

    /// Explore high-scoring items first within each slot.
    ///
    /// Only changes how fast the bound tightens, never which scores are
    /// returned.
    pub presort: bool,

    /// The clock is read when `nodes & clock_check_mask == 0`.
    ///
    /// The cancellation flag is read on every node regardless. `0` reads the
    /// clock on every node.
    pub clock_check_mask: u64,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            time_limit: Duration::from_secs(10),
            tolerance: 1e-4,
            presort: true,
            clock_check_mask: 0x3FF,
        }
    }
}

impl BnbConfig {
    /// Sets the number of results kept.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the hard time ceiling.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the time ceiling in milliseconds.
    pub fn with_time_limit_ms(self, ms: u64) -> Self {
        self.with_time_limit(Duration::from_millis(ms))
    }

    /// Sets the equality tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables or disables the item presort.
    pub fn with_presort(mut self, presort: bool) -> Self {
        self.presort = presort;
        self
    }

    /// Sets the clock check mask (use `2^k - 1`).
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    /// Validates the configuration.
    ///
    /// The runner accepts any configuration (a zero `top_n` returns nothing,
    /// a zero `time_limit` stops immediately); this reports such settings as
    /// errors for callers that want to reject them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
