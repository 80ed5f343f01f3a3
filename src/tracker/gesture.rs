//! Grasp detection over hand landmarks.

use nalgebra::Point2;

use crate::detection::HandPose;

/// Gesture read from one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandGesture {
    pub grasp: bool,
    pub confidence: f32,
}

impl HandGesture {
    pub const NONE: HandGesture = HandGesture {
        grasp: false,
        confidence: 0.0,
    };
}

/// Classifies gestures for smoothed hand poses.
///
/// Must return one entry per input hand, in the same order.
pub trait GestureAnalyzer: Send + Sync {
    fn analyze(&self, hands: &[HandPose]) -> Vec<HandGesture>;
}

const WRIST: usize = 0;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const MIDDLE_MCP: usize = 9;
/// (tip, pip) for index, middle, ring and pinky fingers.
const FINGERS: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];
const HAND_LANDMARKS: usize = 21;

/// Heuristic analyzer for the common 21-point hand layout.
///
/// A hand grasps when enough fingers are curled (tip closer to the wrist
/// than its middle joint) or when thumb and index tips pinch together.
#[derive(Debug, Clone)]
pub struct CurlGraspAnalyzer {
    pub min_curled_fingers: usize,
    /// Pinch distance as a fraction of the wrist to middle-knuckle length.
    pub pinch_ratio: f32,
}

impl Default for CurlGraspAnalyzer {
    fn default() -> Self {
        Self {
            min_curled_fingers: 3,
            pinch_ratio: 0.35,
        }
    }
}

impl CurlGraspAnalyzer {
    fn analyze_hand(&self, hand: &HandPose) -> HandGesture {
        if hand.landmarks.len() < HAND_LANDMARKS {
            return HandGesture::NONE;
        }
        let lm = &hand.landmarks;
        let wrist = lm[WRIST];

        let curled = FINGERS
            .iter()
            .filter(|&&(tip, pip)| dist(&lm[tip], &wrist) < dist(&lm[pip], &wrist))
            .count();

        let palm = dist(&wrist, &lm[MIDDLE_MCP]);
        let pinch = palm > f32::EPSILON
            && dist(&lm[THUMB_TIP], &lm[INDEX_TIP]) < palm * self.pinch_ratio;

        let curl_score = curled as f32 / FINGERS.len() as f32;
        if curled >= self.min_curled_fingers || pinch {
            HandGesture {
                grasp: true,
                confidence: if pinch { curl_score.max(0.8) } else { curl_score },
            }
        } else {
            HandGesture {
                grasp: false,
                confidence: 1.0 - curl_score,
            }
        }
    }
}

impl GestureAnalyzer for CurlGraspAnalyzer {
    fn analyze(&self, hands: &[HandPose]) -> Vec<HandGesture> {
        hands.iter().map(|h| self.analyze_hand(h)).collect()
    }
}

fn dist(a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    (a - b).norm()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::detection::PointSpace;

    /// Open hand pointing up: every fingertip lies beyond its middle joint.
    pub(crate) fn open_hand(cx: f32, cy: f32) -> HandPose {
        let mut lm = vec![Point2::new(cx, cy); HAND_LANDMARKS];
        lm[WRIST] = Point2::new(cx, cy + 40.0);
        lm[MIDDLE_MCP] = Point2::new(cx, cy);
        lm[THUMB_TIP] = Point2::new(cx - 30.0, cy - 10.0);
        for (n, &(tip, pip)) in FINGERS.iter().enumerate() {
            let x = cx - 12.0 + n as f32 * 8.0;
            lm[pip] = Point2::new(x, cy - 15.0);
            lm[tip] = Point2::new(x, cy - 35.0);
        }
        HandPose::new(lm, PointSpace::Screen)
    }

    /// Fist: fingertips folded back below their middle joints.
    pub(crate) fn fist(cx: f32, cy: f32) -> HandPose {
        let mut hand = open_hand(cx, cy);
        for (n, &(tip, _)) in FINGERS.iter().enumerate() {
            hand.landmarks[tip] = Point2::new(cx - 12.0 + n as f32 * 8.0, cy + 5.0);
        }
        hand
    }

    #[test]
    fn test_open_hand_is_not_grasp() {
        let g = CurlGraspAnalyzer::default().analyze(&[open_hand(100.0, 100.0)]);
        assert_eq!(g.len(), 1);
        assert!(!g[0].grasp);
    }

    #[test]
    fn test_fist_is_grasp() {
        let g = CurlGraspAnalyzer::default().analyze(&[fist(100.0, 100.0)]);
        assert!(g[0].grasp);
        assert!((g[0].confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_is_grasp() {
        let mut hand = open_hand(100.0, 100.0);
        hand.landmarks[THUMB_TIP] = hand.landmarks[INDEX_TIP] + nalgebra::Vector2::new(3.0, 0.0);
        let g = CurlGraspAnalyzer::default().analyze(&[hand]);
        assert!(g[0].grasp);
    }

    #[test]
    fn test_partial_hand_never_grasps() {
        let hand = HandPose::new(vec![Point2::new(0.0, 0.0); 5], PointSpace::Screen);
        assert_eq!(CurlGraspAnalyzer::default().analyze(&[hand]), vec![HandGesture::NONE]);
    }
}
