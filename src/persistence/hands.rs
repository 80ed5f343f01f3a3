//! Timeout-based hand persistence.

use std::time::Duration;

use tracing::debug;

use crate::detection::HandPose;
use crate::persistence::LandmarkInterpolator;

/// Holds the last seen hands for a short window after they disappear.
#[derive(Debug, Clone)]
pub struct HandSmoother {
    timeout: Duration,
    last_valid: Option<(Vec<HandPose>, Duration)>,
    interpolator: LandmarkInterpolator,
}

impl HandSmoother {
    pub fn new(timeout: Duration, alpha: f32) -> Self {
        Self {
            timeout,
            last_valid: None,
            interpolator: LandmarkInterpolator::new(alpha),
        }
    }

    /// Feed the hands detected at `now` and get the hands to report.
    pub fn smooth(&mut self, hands: Vec<HandPose>, now: Duration) -> Vec<HandPose> {
        let hands: Vec<HandPose> = hands.into_iter().filter(|h| !h.is_empty()).collect();
        if !hands.is_empty() {
            let smoothed = self.interpolator.smooth(hands);
            self.last_valid = Some((smoothed.clone(), now));
            return smoothed;
        }

        if let Some((held, seen_at)) = &self.last_valid {
            if now.saturating_sub(*seen_at) < self.timeout {
                return held.clone();
            }
            debug!("held hands expired");
            self.last_valid = None;
            self.interpolator.reset();
        }
        Vec::new()
    }

    pub fn reset(&mut self) {
        self.last_valid = None;
        self.interpolator.reset();
    }
}
