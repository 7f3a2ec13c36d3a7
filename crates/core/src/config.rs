use crate::error::SpyError;
use serde::{Deserialize, Serialize};

/// How far past the viewport top a section counts as reached.
///
/// Matches the height of the fixed navigation bar overlapping the page.
pub const DEFAULT_LOOKAHEAD_BIAS: f64 = 100.0;

/// Distance from a scroll target at which a smooth scroll counts as settled.
pub const DEFAULT_SETTLE_TOLERANCE: f64 = 1.0;

/// Tuning knobs for a [`ScrollSpy`](crate::ScrollSpy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpyConfig {
    pub lookahead_bias: f64,
    pub settle_tolerance: f64,
    /// Resolve the active section once right after mount, without waiting
    /// for the first scroll event.
    pub measure_on_mount: bool,
    /// Check the catalog ↔ rendered-region bijection when mounting.
    pub verify_on_mount: bool,
    /// Start with the first section active instead of none.
    pub preselect_first: bool,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            lookahead_bias: DEFAULT_LOOKAHEAD_BIAS,
            settle_tolerance: DEFAULT_SETTLE_TOLERANCE,
            measure_on_mount: true,
            verify_on_mount: false,
            preselect_first: false,
        }
    }
}

impl SpyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SpyError> {
        let config: SpyConfig = serde_json::from_str(json)
            .map_err(|e| SpyError::Config(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_lookahead_bias(mut self, bias: f64) -> Self {
        self.lookahead_bias = bias;
        self
    }

    pub fn with_settle_tolerance(mut self, tolerance: f64) -> Self {
        self.settle_tolerance = tolerance;
        self
    }

    pub fn with_measure_on_mount(mut self, measure: bool) -> Self {
        self.measure_on_mount = measure;
        self
    }

    pub fn with_verify_on_mount(mut self, verify: bool) -> Self {
        self.verify_on_mount = verify;
        self
    }

    pub fn with_preselect_first(mut self, preselect: bool) -> Self {
        self.preselect_first = preselect;
        self
    }

    /// Rejects biases and tolerances that would make resolution meaningless.
    pub fn validate(&self) -> Result<(), SpyError> {
        if !self.lookahead_bias.is_finite() || self.lookahead_bias < 0.0 {
            return Err(SpyError::Config(format!(
                "lookaheadBias must be a finite, non-negative number (got {})",
                self.lookahead_bias
            )));
        }
        if !self.settle_tolerance.is_finite() || self.settle_tolerance < 0.0 {
            return Err(SpyError::Config(format!(
                "settleTolerance must be a finite, non-negative number (got {})",
                self.settle_tolerance
            )));
        }
        Ok(())
    }
}
