//! Pickup, carry and dispose lifecycle driven by fused detections and hands.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bin_match::{self, BinMatchResult};
use crate::classifier::{Category, ClassificationResult, WasteClassifier};
use crate::clock::Clock;
use crate::config::SortingConfig;
use crate::detection::{HandPose, RawDetection, TrackingId};
use crate::error::{ConfigError, DisposalError, TrackerError};
use crate::persistence::{HandSmoother, ObjectSmoother};
use crate::tracker::coords::{CoordinateContext, Size};
use crate::tracker::events::{EventSink, TrackerEvent};
use crate::tracker::gesture::{CurlGraspAnalyzer, GestureAnalyzer, HandGesture};
use crate::tracker::inventory::{Inventory, MemoryInventory};
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::object::{CarriedItem, ObjectTrack, TrackedObject};
use crate::tracker::rect::Rect;
use crate::tracker::track_state::ObjectState;

/// Configuration for the lifecycle tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Max screen-space distance between a hand and an object box to count as approaching.
    pub proximity_threshold: f32,
    /// How long a grasp must be held near an object before it is picked up.
    pub grasp_duration_ms: u64,
    /// How long an object may go unseen before it is forgotten or dropped.
    pub object_timeout_ms: u64,
    /// Landmark indices that stand for the hand in proximity checks.
    pub hand_landmarks: Vec<usize>,
    /// Events buffered for a slow consumer before new ones are shed.
    pub event_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 60.0,
            grasp_duration_ms: 300,
            object_timeout_ms: 1500,
            // wrist, fingertips and middle knuckle
            hand_landmarks: vec![0, 4, 8, 9, 12, 16, 20],
            event_capacity: 256,
        }
    }
}

impl TrackerConfig {
    pub fn grasp_duration(&self) -> Duration {
        Duration::from_millis(self.grasp_duration_ms)
    }

    pub fn object_timeout(&self) -> Duration {
        Duration::from_millis(self.object_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.proximity_threshold.is_finite() && self.proximity_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tracker.proximity_threshold must be a non-negative number, got {}",
                self.proximity_threshold
            )));
        }
        if self.object_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "tracker.object_timeout_ms must be positive".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "tracker.event_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Points awarded per disposed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub recyclable: u32,
    pub organic: u32,
    pub electronic_waste: u32,
    pub hazardous: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recyclable: 10,
            organic: 5,
            electronic_waste: 25,
            hazardous: 30,
        }
    }
}

impl ScoringConfig {
    pub fn points_for(&self, category: Category) -> u32 {
        match category {
            Category::Recyclable => self.recyclable,
            Category::Organic => self.organic,
            Category::ElectronicWaste => self.electronic_waste,
            Category::Hazardous => self.hazardous,
        }
    }
}

/// What one fusion pass produced.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub timestamp: Duration,
    /// Every live object, carried ones included.
    pub objects: Vec<TrackedObject>,
    /// Smoothed hands in screen space.
    pub hands: Vec<HandPose>,
    /// One entry per hand in `hands`.
    pub gestures: Vec<HandGesture>,
    pub picked_up: Vec<CarriedItem>,
    pub dropped: Vec<CarriedItem>,
}

struct Observation {
    tracking_id: TrackingId,
    result: ClassificationResult,
    bbox: Rect,
}

/// Fuses smoothed detections and hands into per-object state and owns the carried set.
pub struct LifecycleTracker {
    classifier: WasteClassifier,
    config: TrackerConfig,
    scoring: ScoringConfig,
    object_smoother: ObjectSmoother,
    hand_smoother: HandSmoother,
    gestures: Box<dyn GestureAnalyzer>,
    inventory: Box<dyn Inventory>,
    clock: Arc<dyn Clock>,
    context: Option<CoordinateContext>,
    tracks: Vec<ObjectTrack>,
    carried: Vec<CarriedItem>,
    retired: HashSet<TrackingId>,
    events: EventSink,
}

impl LifecycleTracker {
    /// Build a tracker and the receiving end of its event stream.
    pub fn new(
        config: SortingConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, Receiver<TrackerEvent>), ConfigError> {
        config.validate()?;
        let classifier = WasteClassifier::new(config.classifier)?;
        let (events, rx) = EventSink::channel(config.tracker.event_capacity);
        let persistence = config.persistence;

        let tracker = Self {
            classifier,
            config: config.tracker,
            scoring: config.scoring,
            object_smoother: ObjectSmoother::new(persistence.max_object_misses),
            hand_smoother: HandSmoother::new(
                persistence.hand_timeout(),
                persistence.interpolation_alpha,
            ),
            gestures: Box::new(CurlGraspAnalyzer::default()),
            inventory: Box::new(MemoryInventory::new()),
            clock,
            context: None,
            tracks: Vec::new(),
            carried: Vec::new(),
            retired: HashSet::new(),
            events,
        };
        Ok((tracker, rx))
    }

    pub fn with_gesture_analyzer(mut self, analyzer: Box<dyn GestureAnalyzer>) -> Self {
        self.gestures = analyzer;
        self
    }

    pub fn with_inventory(mut self, inventory: Box<dyn Inventory>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Set the image and screen sizes used to bring both streams into one space.
    pub fn set_coordinate_context(
        &mut self,
        source_image: Size,
        destination_screen: Size,
    ) -> Result<(), TrackerError> {
        let context = CoordinateContext::new(source_image, destination_screen)?;
        if self.context.as_ref() != Some(&context) {
            debug!(
                src_w = source_image.width,
                src_h = source_image.height,
                dst_w = destination_screen.width,
                dst_h = destination_screen.height,
                "coordinate context updated"
            );
        }
        self.context = Some(context);
        Ok(())
    }

    pub fn coordinate_context(&self) -> Option<&CoordinateContext> {
        self.context.as_ref()
    }

    pub fn classifier(&self) -> &WasteClassifier {
        &self.classifier
    }

    /// Run one fusion pass over this frame's raw detections and hands.
    pub fn process_frame(
        &mut self,
        detections: Vec<RawDetection>,
        hands: Vec<HandPose>,
    ) -> Result<FrameReport, TrackerError> {
        let context = self
            .context
            .clone()
            .ok_or(TrackerError::MissingCoordinateContext)?;
        let now = self.clock.now();

        let object_smoother = &mut self.object_smoother;
        let hand_smoother = &mut self.hand_smoother;
        let classifier = &self.classifier;
        let analyzer = &*self.gestures;
        let (observations, (hands, mut gestures)) = rayon::join(
            || observe_objects(object_smoother, classifier, &context, detections),
            || observe_hands(hand_smoother, analyzer, &context, hands, now),
        );
        gestures.resize(hands.len(), HandGesture::NONE);

        let visible = self.update_tracks(observations, now);
        let picked_up = self.associate_hands(&visible, &hands, &gestures, now);
        let dropped = self.expire_tracks(now);

        Ok(FrameReport {
            timestamp: now,
            objects: self.objects(),
            hands,
            gestures,
            picked_up,
            dropped,
        })
    }

    /// Create or refresh tracks; returns the ids visible this frame in detection order.
    fn update_tracks(&mut self, observations: Vec<Observation>, now: Duration) -> Vec<TrackingId> {
        let mut visible = Vec::with_capacity(observations.len());
        for obs in observations {
            if self.retired.contains(&obs.tracking_id) || visible.contains(&obs.tracking_id) {
                continue;
            }
            match self.track_mut(obs.tracking_id) {
                Some(track) => track.refresh(&obs.result, obs.bbox, now),
                None => {
                    debug!(
                        id = %obs.tracking_id,
                        category = %obs.result.category,
                        label = %obs.result.label,
                        "tracking new object"
                    );
                    self.tracks
                        .push(ObjectTrack::new(obs.tracking_id, &obs.result, obs.bbox, now));
                }
            }
            visible.push(obs.tracking_id);
        }
        visible
    }

    fn associate_hands(
        &mut self,
        visible: &[TrackingId],
        hands: &[HandPose],
        gestures: &[HandGesture],
        now: Duration,
    ) -> Vec<CarriedItem> {
        let candidates: Vec<usize> = self
            .tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                visible.contains(&t.object.tracking_id)
                    && matches!(t.state(), ObjectState::Detected | ObjectState::Approaching)
            })
            .map(|(i, _)| i)
            .collect();
        let boxes: Vec<Rect> = candidates.iter().map(|&i| self.tracks[i].object.bbox).collect();

        let cost = matching::proximity_cost(hands, &boxes, &self.config.hand_landmarks);
        let AssignmentResult {
            mut matches,
            unmatched_cols,
            ..
        } = matching::linear_assignment(&cost, self.config.proximity_threshold);

        for col in unmatched_cols {
            let track = &mut self.tracks[candidates[col]];
            if track.state() == ObjectState::Approaching {
                debug!(id = %track.object.tracking_id, "hand moved away");
                track.set_state(ObjectState::Detected);
            }
        }

        matches.sort_by_key(|&(_, col)| col);
        let grasp_duration = self.config.grasp_duration();
        let mut picked_up = Vec::new();
        for (hand, col) in matches {
            let track = &mut self.tracks[candidates[col]];
            if track.state() == ObjectState::Detected {
                track.set_state(ObjectState::Approaching);
            }
            if !gestures[hand].grasp {
                track.grasp_since = None;
                continue;
            }
            let since = *track.grasp_since.get_or_insert(now);
            if now.saturating_sub(since) < grasp_duration {
                continue;
            }

            track.set_state(ObjectState::Carried);
            let item = track.to_carried(now);
            info!(
                id = %item.tracking_id,
                category = %item.category,
                name = %item.display_name,
                "object picked up"
            );
            self.carried.push(item.clone());
            if let Err(e) = self.inventory.insert(&item) {
                warn!(id = %item.tracking_id, "failed to mirror pickup into inventory: {}", e);
            }
            self.events.emit(TrackerEvent::PickedUp(item.clone()));
            picked_up.push(item);
        }
        picked_up
    }

    fn expire_tracks(&mut self, now: Duration) -> Vec<CarriedItem> {
        let timeout = self.config.object_timeout();
        let (expired, live): (Vec<ObjectTrack>, Vec<ObjectTrack>) = std::mem::take(&mut self.tracks)
            .into_iter()
            .partition(|t| now.saturating_sub(t.last_seen) > timeout);
        self.tracks = live;

        let mut dropped = Vec::new();
        for mut track in expired {
            let id = track.object.tracking_id;
            if track.state() != ObjectState::Carried {
                debug!(id = %id, "object expired");
                continue;
            }
            track.set_state(ObjectState::Dropped);
            let Some(pos) = self.carried.iter().position(|c| c.tracking_id == id) else {
                continue;
            };
            let item = self.carried.remove(pos);
            info!(id = %id, name = %item.display_name, "carried object lost, dropping");
            if let Err(e) = self.inventory.remove(&[id]) {
                warn!(id = %id, "failed to remove dropped item from inventory: {}", e);
            }
            self.events.emit(TrackerEvent::Dropped(item.clone()));
            dropped.push(item);
        }
        dropped
    }

    /// Compare everything currently carried against one bin.
    pub fn match_bin(&self, bin: Category) -> BinMatchResult {
        bin_match::match_bin(&self.carried, bin)
    }

    /// Dispose the matching items of `result` and return the points earned.
    ///
    /// Items that are no longer carried, or are now carried under another
    /// category than the result's bin, are skipped. When the inventory
    /// refuses the removal nothing changes and the error is retryable.
    pub fn confirm_disposal(&mut self, result: &BinMatchResult) -> Result<u32, DisposalError> {
        if !result.has_matches() {
            return Ok(0);
        }
        let ids: Vec<TrackingId> = result
            .matching_items
            .iter()
            .map(|item| item.tracking_id)
            .filter(|id| {
                self.carried
                    .iter()
                    .any(|c| c.tracking_id == *id && c.category == result.bin)
            })
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        self.inventory.remove(&ids)?;

        let mut points = 0;
        let scoring = &self.scoring;
        self.carried.retain(|item| {
            if ids.contains(&item.tracking_id) {
                points += scoring.points_for(item.category);
                false
            } else {
                true
            }
        });
        for track in self.tracks.iter_mut().filter(|t| ids.contains(&t.object.tracking_id)) {
            track.set_state(ObjectState::Disposed);
        }
        self.tracks.retain(|t| t.state() != ObjectState::Disposed);
        self.retired.extend(ids.iter().copied());

        info!(bin = %result.bin, items = ids.len(), points, "items disposed");
        self.events.emit(TrackerEvent::Disposed {
            bin: result.bin,
            items: ids,
            points,
        });
        Ok(points)
    }

    /// Forget all tracks, carried items and smoothing history.
    ///
    /// The coordinate context is kept.
    pub fn reset(&mut self) {
        self.object_smoother.reset();
        self.hand_smoother.reset();
        self.tracks.clear();
        self.carried.clear();
        self.retired.clear();
        if let Err(e) = self.inventory.clear() {
            warn!("failed to clear inventory on reset: {}", e);
        }
        info!("tracker reset");
    }

    pub fn carried_items(&self) -> &[CarriedItem] {
        &self.carried
    }

    pub fn inventory(&self) -> &dyn Inventory {
        &*self.inventory
    }

    pub fn objects(&self) -> Vec<TrackedObject> {
        self.tracks.iter().map(|t| t.object.clone()).collect()
    }

    pub fn object_state(&self, id: TrackingId) -> Option<ObjectState> {
        self.tracks
            .iter()
            .find(|t| t.object.tracking_id == id)
            .map(|t| t.state())
    }

    fn track_mut(&mut self, id: TrackingId) -> Option<&mut ObjectTrack> {
        self.tracks.iter_mut().find(|t| t.object.tracking_id == id)
    }
}

fn observe_objects(
    smoother: &mut ObjectSmoother,
    classifier: &WasteClassifier,
    context: &CoordinateContext,
    detections: Vec<RawDetection>,
) -> Vec<Observation> {
    smoother
        .smooth(detections)
        .into_iter()
        .filter_map(|det| {
            let tracking_id = det.tracking_id?;
            let result = classifier.classify_batch(&det.labels)?;
            Some(Observation {
                tracking_id,
                result,
                bbox: context.map_rect(&det.bbox),
            })
        })
        .collect()
}

fn observe_hands(
    smoother: &mut HandSmoother,
    analyzer: &dyn GestureAnalyzer,
    context: &CoordinateContext,
    hands: Vec<HandPose>,
    now: Duration,
) -> (Vec<HandPose>, Vec<HandGesture>) {
    let hands: Vec<HandPose> = smoother
        .smooth(hands, now)
        .iter()
        .map(|h| context.map_hand(h))
        .collect();
    let gestures = analyzer.analyze(&hands);
    (hands, gestures)
}
