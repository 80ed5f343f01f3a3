//! Waste-sorting game core: label classification, detection smoothing,
//! pickup/carry/dispose tracking and bin matching.
//!
//! The camera, the object detector and the hand-pose model live outside
//! this crate. Each frame their output is smoothed by [`persistence`],
//! labelled by [`classifier`], and fused by the [`LifecycleTracker`] into
//! per-object state and a carried set that [`match_bin`] compares against
//! a scanned bin.
//!
//! ```ignore
//! use std::sync::Arc;
//! use binsight::{Category, LifecycleTracker, MonotonicClock, Size, SortingConfig};
//!
//! let (mut tracker, events) = LifecycleTracker::new(SortingConfig::default(), Arc::new(MonotonicClock::new()))?;
//! tracker.set_coordinate_context(Size::new(480.0, 640.0), Size::new(1080.0, 1920.0))?;
//! let report = tracker.process_frame(detections, hands)?;
//! let result = tracker.match_bin(Category::Recyclable);
//! let points = tracker.confirm_disposal(&result)?;
//! ```

pub mod bin_match;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod detection;
pub mod error;
pub mod integration;
pub mod persistence;
pub mod tracker;

pub use bin_match::{BinMatchResult, MatchOutcome, ScannedBin, match_bin};
pub use classifier::{Category, ClassificationResult, ClassifierConfig, MatchKind, WasteClassifier};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::SortingConfig;
pub use detection::{HandPose, Label, PointSpace, RawDetection, TrackingId};
pub use error::{
    BinScanError, ConfigError, DisposalError, Error, InventoryError, Result, TrackerError,
};
pub use integration::{DetectionSource, FrameOutcome, HandPoseSource, SortingPipeline};
pub use persistence::{HandSmoother, ObjectSmoother, PersistenceConfig};
pub use tracker::{
    CarriedItem, CurlGraspAnalyzer, FrameReport, GestureAnalyzer, HandGesture, Inventory,
    LifecycleTracker, MemoryInventory, ObjectState, Rect, ScoringConfig, Size, TrackedObject,
    TrackerConfig, TrackerEvent,
};
