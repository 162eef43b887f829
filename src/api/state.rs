//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, LaborRules};
use crate::thresholds::{ConfigThresholdSource, ThresholdSource};

/// Default bound on the per-store threshold lookup.
pub const DEFAULT_THRESHOLD_TIMEOUT: Duration = Duration::from_millis(500);

/// Shared application state.
///
/// Holds the loaded labor rules, the clock used for open shifts and the
/// source of per-store threshold policies.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<LaborRules>,
    clock: Arc<dyn Clock>,
    thresholds: Arc<dyn ThresholdSource>,
    threshold_timeout: Duration,
}

impl AppState {
    /// Creates state from loaded configuration.
    ///
    /// Uses the system clock, and the configuration's own store policies as
    /// the threshold source.
    pub fn new(config: ConfigLoader) -> Self {
        let rules = Arc::new(config.into_rules());
        Self {
            thresholds: Arc::new(ConfigThresholdSource::new(Arc::clone(&rules))),
            rules,
            clock: Arc::new(SystemClock),
            threshold_timeout: DEFAULT_THRESHOLD_TIMEOUT,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the threshold source.
    pub fn with_threshold_source(mut self, source: Arc<dyn ThresholdSource>) -> Self {
        self.thresholds = source;
        self
    }

    /// Replaces the threshold lookup timeout.
    pub fn with_threshold_timeout(mut self, timeout: Duration) -> Self {
        self.threshold_timeout = timeout;
        self
    }

    /// Returns the loaded labor rules.
    pub fn rules(&self) -> &LaborRules {
        &self.rules
    }

    /// Returns a shared handle to the labor rules.
    pub fn shared_rules(&self) -> Arc<LaborRules> {
        Arc::clone(&self.rules)
    }

    /// Returns a shared handle to the clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Returns the threshold source.
    pub fn threshold_source(&self) -> &dyn ThresholdSource {
        self.thresholds.as_ref()
    }

    /// Returns a shared handle to the threshold source.
    pub fn shared_threshold_source(&self) -> Arc<dyn ThresholdSource> {
        Arc::clone(&self.thresholds)
    }

    /// Returns the threshold lookup timeout.
    pub fn threshold_timeout(&self) -> Duration {
        self.threshold_timeout
    }
}
