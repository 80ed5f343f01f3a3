//! Tracked and carried objects.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::{Category, ClassificationResult, Color};
use crate::detection::TrackingId;
use crate::tracker::Rect;
use crate::tracker::track_state::ObjectState;

/// A classified object the tracker is following.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub tracking_id: TrackingId,
    pub category: Category,
    pub display_name: String,
    /// Screen-space box from the most recent sighting.
    pub bbox: Rect,
    pub confidence: f32,
    pub color: Color,
    pub detected_at: Duration,
    pub state: ObjectState,
}

/// An object attributed to the user, waiting to be disposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarriedItem {
    pub tracking_id: TrackingId,
    pub category: Category,
    pub display_name: String,
    pub confidence: f32,
    pub color: Color,
    pub picked_up_at: Duration,
}

impl CarriedItem {
    pub fn new(tracking_id: u64, category: Category, display_name: &str) -> Self {
        Self {
            tracking_id: TrackingId(tracking_id),
            category,
            display_name: display_name.to_string(),
            confidence: 1.0,
            color: category.color(),
            picked_up_at: Duration::ZERO,
        }
    }
}

/// Per-id tracker bookkeeping around a [`TrackedObject`].
#[derive(Debug, Clone)]
pub(crate) struct ObjectTrack {
    pub object: TrackedObject,
    pub last_seen: Duration,
    pub grasp_since: Option<Duration>,
}

impl ObjectTrack {
    pub fn new(tracking_id: TrackingId, result: &ClassificationResult, bbox: Rect, now: Duration) -> Self {
        Self {
            object: TrackedObject {
                tracking_id,
                category: result.category,
                display_name: display_name(&result.label),
                bbox,
                confidence: result.confidence,
                color: result.category.color(),
                detected_at: now,
                state: ObjectState::Detected,
            },
            last_seen: now,
            grasp_since: None,
        }
    }

    /// Refresh from a new sighting. The category stays fixed.
    pub fn refresh(&mut self, result: &ClassificationResult, bbox: Rect, now: Duration) {
        self.object.bbox = bbox;
        self.object.confidence = result.confidence;
        self.last_seen = now;
    }

    pub fn state(&self) -> ObjectState {
        self.object.state
    }

    pub fn set_state(&mut self, state: ObjectState) {
        self.object.state = state;
        if state != ObjectState::Approaching {
            self.grasp_since = None;
        }
    }

    pub fn to_carried(&self, now: Duration) -> CarriedItem {
        CarriedItem {
            tracking_id: self.object.tracking_id,
            category: self.object.category,
            display_name: self.object.display_name.clone(),
            confidence: self.object.confidence,
            color: self.object.color,
            picked_up_at: now,
        }
    }
}

/// Capitalize each word of a detector label.
fn display_name(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
