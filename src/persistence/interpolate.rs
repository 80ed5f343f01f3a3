//! Exponential blending of hand landmarks across frames.

use ndarray::Array2;
use tracing::trace;

use crate::detection::HandPose;
use crate::tracker::{AssignmentResult, linear_assignment};

/// Blends each hand's landmarks with the same hand's previous smoothed position.
///
/// The hand model does not keep hand order stable, so each new hand is
/// paired with the nearest previous hand by centroid distance. Hands left
/// without a compatible partner (new hand, different landmark count or
/// coordinate space) start over from their raw position.
#[derive(Debug, Clone)]
pub struct LandmarkInterpolator {
    alpha: f32,
    history: Vec<HandPose>,
}

impl LandmarkInterpolator {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(f32::EPSILON, 1.0),
            history: Vec::new(),
        }
    }

    pub fn smooth(&mut self, hands: Vec<HandPose>) -> Vec<HandPose> {
        let cost = pairing_cost(&hands, &self.history);
        let AssignmentResult {
            matches,
            unmatched_rows,
            ..
        } = linear_assignment(&cost, f32::MAX);
        if !unmatched_rows.is_empty() {
            trace!(fresh = unmatched_rows.len(), "hands without history");
        }

        let mut partner: Vec<Option<usize>> = vec![None; hands.len()];
        for (row, col) in matches {
            partner[row] = Some(col);
        }

        let smoothed: Vec<HandPose> = hands
            .into_iter()
            .zip(partner)
            .map(|(hand, prev)| match prev {
                Some(j) => self.blend(&self.history[j], hand),
                None => hand,
            })
            .collect();
        self.history = smoothed.clone();
        smoothed
    }

    fn blend(&self, prev: &HandPose, mut current: HandPose) -> HandPose {
        for (point, old) in current.landmarks.iter_mut().zip(prev.landmarks.iter()) {
            point.coords = old.coords.lerp(&point.coords, self.alpha);
        }
        current
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

/// Centroid distance of shape (current, previous); incompatible pairs are infinite.
fn pairing_cost(current: &[HandPose], previous: &[HandPose]) -> Array2<f32> {
    let mut cost = Array2::from_elem((current.len(), previous.len()), f32::INFINITY);
    for (i, hand) in current.iter().enumerate() {
        for (j, prev) in previous.iter().enumerate() {
            if hand.space != prev.space || hand.landmarks.len() != prev.landmarks.len() {
                continue;
            }
            if let (Some(a), Some(b)) = (hand.centroid(), prev.centroid()) {
                cost[[i, j]] = (a - b).norm();
            }
        }
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn hand(x: f32) -> HandPose {
        HandPose::normalized(vec![Point2::new(x, 0.5), Point2::new(x, 0.6)])
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut interp = LandmarkInterpolator::new(0.5);
        let out = interp.smooth(vec![hand(0.2)]);
        assert_eq!(out[0], hand(0.2));
    }

    #[test]
    fn test_blends_towards_new_position() {
        let mut interp = LandmarkInterpolator::new(0.5);
        interp.smooth(vec![hand(0.2)]);
        let out = interp.smooth(vec![hand(0.4)]);
        assert!((out[0].landmarks[0].x - 0.3).abs() < 1e-6);
        assert!((out[0].landmarks[1].y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_swapped_hands_blend_with_their_own_history() {
        let mut interp = LandmarkInterpolator::new(0.6);
        interp.smooth(vec![hand(0.1), hand(0.5)]);

        let out = interp.smooth(vec![hand(0.52), hand(0.12)]);
        assert!((out[0].landmarks[0].x - 0.512).abs() < 1e-5);
        assert!((out[1].landmarks[0].x - 0.112).abs() < 1e-5);
    }

    #[test]
    fn test_extra_hand_starts_from_raw_position() {
        let mut interp = LandmarkInterpolator::new(0.5);
        interp.smooth(vec![hand(0.2)]);
        let out = interp.smooth(vec![hand(0.9), hand(0.2)]);
        assert_eq!(out[0], hand(0.9));
        assert_eq!(out[1], hand(0.2));
    }

    #[test]
    fn test_mismatched_shape_restarts() {
        let mut interp = LandmarkInterpolator::new(0.5);
        interp.smooth(vec![hand(0.2)]);
        let single = HandPose::normalized(vec![Point2::new(0.9, 0.9)]);
        let out = interp.smooth(vec![single.clone()]);
        assert_eq!(out[0], single);
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut interp = LandmarkInterpolator::new(0.5);
        interp.smooth(vec![hand(0.2)]);
        interp.reset();
        let out = interp.smooth(vec![hand(0.8)]);
        assert_eq!(out[0], hand(0.8));
    }
}
