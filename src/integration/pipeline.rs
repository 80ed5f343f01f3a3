//! SortingPipeline for combining detection, hand tracking and the lifecycle tracker.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::bin_match::{BinMatchResult, ScannedBin};
use crate::classifier::Category;
use crate::error::{DisposalError, TrackerError};
use crate::tracker::{CarriedItem, FrameReport, LifecycleTracker, Size};

use super::{DetectionSource, HandPoseSource};

#[derive(Debug)]
pub enum FrameOutcome {
    Processed(FrameReport),
    /// Another frame was still being processed.
    Skipped,
}

impl FrameOutcome {
    pub fn report(self) -> Option<FrameReport> {
        match self {
            FrameOutcome::Processed(report) => Some(report),
            FrameOutcome::Skipped => None,
        }
    }
}

/// Clears the in-flight flag when the frame finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs the external models on camera frames and feeds the lifecycle tracker.
///
/// All methods take `&self` so the pipeline can be shared between the
/// camera callback and the UI. The tracker sits behind a single lock,
/// which keeps frame fusion, disposal and reset from interleaving.
pub struct SortingPipeline<D: DetectionSource, H: HandPoseSource> {
    detector: Mutex<D>,
    hand_model: Mutex<H>,
    tracker: Mutex<LifecycleTracker>,
    in_flight: AtomicBool,
}

impl<D: DetectionSource, H: HandPoseSource> SortingPipeline<D, H> {
    pub fn new(detector: D, hand_model: H, tracker: LifecycleTracker) -> Self {
        Self {
            detector: Mutex::new(detector),
            hand_model: Mutex::new(hand_model),
            tracker: Mutex::new(tracker),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Process a single camera frame.
    ///
    /// Returns [`FrameOutcome::Skipped`] without doing any work when the
    /// previous frame is still in flight. A failing model only empties its
    /// own stream for this frame.
    pub fn process_frame(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameOutcome, TrackerError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("frame dropped, previous frame still in flight");
            return Ok(FrameOutcome::Skipped);
        };

        let (detections, hands) = rayon::join(
            || match self.detector.lock().detect(input, width, height) {
                Ok(detections) => detections,
                Err(e) => {
                    warn!("object detection failed for this frame: {}", e);
                    Vec::new()
                }
            },
            || match self.hand_model.lock().detect_hands(input, width, height) {
                Ok(hands) => hands,
                Err(e) => {
                    warn!("hand pose detection failed for this frame: {}", e);
                    Vec::new()
                }
            },
        );

        let report = self.tracker.lock().process_frame(detections, hands)?;
        Ok(FrameOutcome::Processed(report))
    }

    /// Dispose everything matching a scanned bin QR payload.
    ///
    /// Matching and confirmation happen under one lock, so no frame can
    /// change the carried set in between.
    pub fn dispose_scanned(&self, payload: &str) -> crate::Result<(BinMatchResult, u32)> {
        let bin = ScannedBin::from_qr_payload(payload)?;
        let mut tracker = self.tracker.lock();
        let result = tracker.match_bin(bin.category);
        let points = tracker.confirm_disposal(&result)?;
        debug!(bin_id = %bin.bin_id, outcome = ?result.outcome, points, "scanned bin confirmed");
        Ok((result, points))
    }

    pub fn set_coordinate_context(
        &self,
        source_image: Size,
        destination_screen: Size,
    ) -> Result<(), TrackerError> {
        self.tracker
            .lock()
            .set_coordinate_context(source_image, destination_screen)
    }

    pub fn match_bin(&self, bin: Category) -> BinMatchResult {
        self.tracker.lock().match_bin(bin)
    }

    pub fn confirm_disposal(&self, result: &BinMatchResult) -> Result<u32, DisposalError> {
        self.tracker.lock().confirm_disposal(result)
    }

    pub fn reset(&self) {
        self.tracker.lock().reset();
    }

    pub fn carried_items(&self) -> Vec<CarriedItem> {
        self.tracker.lock().carried_items().to_vec()
    }

    /// Run `f` with exclusive access to the tracker.
    pub fn with_tracker<R>(&self, f: impl FnOnce(&mut LifecycleTracker) -> R) -> R {
        f(&mut self.tracker.lock())
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}
