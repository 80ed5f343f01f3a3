//! Per-frame inputs produced by the external detector and hand-pose model.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::Rect;

/// Stable identifier the detector assigns to one physical object across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackingId(pub u64);

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One text label with the detector's confidence for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Raw object detection for one frame.
///
/// `bbox` is in source-image pixels. A detection may carry several labels
/// for the same object; they are classified together.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub tracking_id: Option<TrackingId>,
    pub labels: Vec<Label>,
    pub bbox: Rect,
}

impl RawDetection {
    /// Single-label detection with a tracking id.
    pub fn new(tracking_id: u64, label: &str, confidence: f32, bbox: Rect) -> Self {
        Self {
            tracking_id: Some(TrackingId(tracking_id)),
            labels: vec![Label::new(label, confidence)],
            bbox,
        }
    }

    /// Add another label the detector reported for the same object.
    pub fn with_label(mut self, label: &str, confidence: f32) -> Self {
        self.labels.push(Label::new(label, confidence));
        self
    }
}

/// Coordinate space the hand model reports landmarks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointSpace {
    /// `[0, 1]` fractions of the source image.
    #[default]
    Normalized,
    /// Source-image pixels, same space as detection boxes.
    ImagePixels,
    /// Already mapped to the destination screen.
    Screen,
}

/// Landmarks of one detected hand, wrist first, then per-finger joints.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub landmarks: Vec<Point2<f32>>,
    pub space: PointSpace,
}

impl HandPose {
    pub fn new(landmarks: Vec<Point2<f32>>, space: PointSpace) -> Self {
        Self { landmarks, space }
    }

    pub fn normalized(landmarks: Vec<Point2<f32>>) -> Self {
        Self::new(landmarks, PointSpace::Normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Mean of all landmarks, if any.
    pub fn centroid(&self) -> Option<Point2<f32>> {
        if self.landmarks.is_empty() {
            return None;
        }
        let n = self.landmarks.len() as f32;
        let sum = self
            .landmarks
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / n))
    }
}
