//! Miss-counter smoothing for object detections.

use tracing::debug;

use crate::detection::RawDetection;

/// Keeps reporting the last non-empty detection list across short gaps.
#[derive(Debug, Clone)]
pub struct ObjectSmoother {
    last_good: Vec<RawDetection>,
    misses: u32,
    max_misses: u32,
}

impl ObjectSmoother {
    pub fn new(max_misses: u32) -> Self {
        Self {
            last_good: Vec::new(),
            misses: 0,
            max_misses,
        }
    }

    /// Feed one frame and get the list to report for it.
    ///
    /// A non-empty frame replaces the held list. Empty frames repeat it
    /// until the miss count reaches `max_misses`, at which point it is cleared.
    pub fn smooth(&mut self, detections: Vec<RawDetection>) -> Vec<RawDetection> {
        if !detections.is_empty() {
            self.misses = 0;
            self.last_good = detections;
            return self.last_good.clone();
        }

        self.misses += 1;
        if self.misses < self.max_misses {
            debug!(misses = self.misses, held = self.last_good.len(), "holding last detections");
            return self.last_good.clone();
        }

        if !self.last_good.is_empty() {
            debug!(misses = self.misses, "detections expired");
        }
        self.last_good.clear();
        self.misses = 0;
        Vec::new()
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn reset(&mut self) {
        self.last_good.clear();
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Rect;

    fn det(id: u64) -> RawDetection {
        RawDetection::new(id, "bottle", 0.9, Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_holds_for_two_misses_then_clears() {
        let mut smoother = ObjectSmoother::new(3);

        assert_eq!(smoother.smooth(vec![det(1)]).len(), 1);

        let frame2 = smoother.smooth(vec![]);
        assert_eq!(frame2.len(), 1);
        assert_eq!(smoother.misses(), 1);

        let frame3 = smoother.smooth(vec![]);
        assert_eq!(frame3.len(), 1);
        assert_eq!(smoother.misses(), 2);

        let frame4 = smoother.smooth(vec![]);
        assert!(frame4.is_empty());
        assert_eq!(smoother.misses(), 0);

        // Nothing left to hold.
        assert!(smoother.smooth(vec![]).is_empty());
    }

    #[test]
    fn test_new_detections_reset_counter() {
        let mut smoother = ObjectSmoother::new(3);
        smoother.smooth(vec![det(1)]);
        smoother.smooth(vec![]);
        smoother.smooth(vec![]);

        let fresh = smoother.smooth(vec![det(2)]);
        assert_eq!(fresh[0].tracking_id.map(|id| id.0), Some(2));
        assert_eq!(smoother.misses(), 0);

        assert_eq!(smoother.smooth(vec![]).len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut smoother = ObjectSmoother::new(3);
        smoother.smooth(vec![det(1)]);
        smoother.smooth(vec![]);
        smoother.reset();
        assert_eq!(smoother.misses(), 0);
        assert!(smoother.smooth(vec![]).is_empty());
    }
}
