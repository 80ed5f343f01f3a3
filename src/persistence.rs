//! Short-term smoothing of per-frame detections and hand poses.

mod hands;
mod interpolate;
mod objects;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use hands::HandSmoother;
pub use interpolate::LandmarkInterpolator;
pub use objects::ObjectSmoother;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Consecutive empty frames after which the last detections are dropped.
    pub max_object_misses: u32,
    /// How long the last hands are held after they vanish.
    pub hand_timeout_ms: u64,
    /// Weight of the newest frame when blending landmarks, in `(0, 1]`.
    pub interpolation_alpha: f32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            max_object_misses: 3,
            hand_timeout_ms: 200,
            interpolation_alpha: 0.6,
        }
    }
}

impl PersistenceConfig {
    pub fn hand_timeout(&self) -> Duration {
        Duration::from_millis(self.hand_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_object_misses == 0 {
            return Err(ConfigError::Invalid(
                "persistence.max_object_misses must be at least 1".into(),
            ));
        }
        if !(self.interpolation_alpha > 0.0 && self.interpolation_alpha <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "persistence.interpolation_alpha must be within (0, 1], got {}",
                self.interpolation_alpha
            )));
        }
        Ok(())
    }
}
