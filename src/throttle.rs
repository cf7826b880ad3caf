//! Randomized pre-request delay.
//!
//! Each item fetch is preceded by a sleep drawn uniformly from a fixed
//! `[min, max]` range. The range never adapts to successes or failures.

use crate::error::ConfigError;
use rand::{Rng, rng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Inclusive delay range, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    min: f64,
    max: f64,
}

impl Throttle {
    /// Build a delay range.
    ///
    /// # Arguments
    ///
    /// * `min_secs` - Shortest delay, in seconds
    /// * `max_secs` - Longest delay, in seconds
    ///
    /// # Returns
    ///
    /// `ConfigError::Delay` unless `0 <= min_secs <= max_secs` and both bounds
    /// fit in a [`Duration`].
    pub fn new(min_secs: f64, max_secs: f64) -> Result<Self, ConfigError> {
        let representable = |s: f64| Duration::try_from_secs_f64(s).is_ok();
        let valid = representable(min_secs) && representable(max_secs) && min_secs <= max_secs;
        if !valid {
            return Err(ConfigError::Delay {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(Self {
            min: min_secs,
            max: max_secs,
        })
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    pub fn min_secs(&self) -> f64 {
        self.min
    }

    pub fn max_secs(&self) -> f64 {
        self.max
    }

    /// Draw the next delay.
    pub fn pick(&self) -> Duration {
        let secs = if self.max > self.min {
            rng().random_range(self.min..=self.max)
        } else {
            self.min
        };
        // Both bounds were checked in `new`, so any value between them fits.
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Sleep for a freshly drawn delay.
    pub async fn wait(&self) {
        let delay = self.pick();
        if delay.is_zero() {
            return;
        }
        debug!(?delay, "Throttling before request");
        sleep(delay).await;
    }
}
