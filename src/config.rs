use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ewma span must be at least 1")]
    SpanZero,
    #[error("shrinkage alpha must be positive and finite, got {0}")]
    BadAlpha(f64),
    #[error("poisson weight must lie in [0, 1], got {0}")]
    BadPoissonWeight(f64),
    #[error("sigma floor must be positive and finite, got {0}")]
    BadSigmaFloor(f64),
}

/// Parameters of the estimation pipeline. Callers are expected to call
/// `validate` at the boundary: out-of-range values are rejected rather
/// than clamped, so a misconfigured caller fails loudly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelConfig {
    /// EWMA span in matches (recommended 3-12).
    pub span: u32,
    /// Shrinkage pseudo-count (recommended 1-30).
    pub alpha: f64,
    /// Weight of the Poisson tail in the mixture, in [0, 1].
    pub poisson_weight: f64,
    /// Minimum per-side dispersion in count units.
    pub sigma_floor: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            span: 6,
            alpha: 10.0,
            poisson_weight: 0.6,
            sigma_floor: 0.6,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.span == 0 {
            return Err(ConfigError::SpanZero);
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ConfigError::BadAlpha(self.alpha));
        }
        if !self.poisson_weight.is_finite() || !(0.0..=1.0).contains(&self.poisson_weight) {
            return Err(ConfigError::BadPoissonWeight(self.poisson_weight));
        }
        if !self.sigma_floor.is_finite() || self.sigma_floor <= 0.0 {
            return Err(ConfigError::BadSigmaFloor(self.sigma_floor));
        }
        Ok(())
    }
}
