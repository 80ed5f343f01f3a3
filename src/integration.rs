//! Connecting the external detector and hand model to the lifecycle tracker.

mod pipeline;
mod sources;

pub use pipeline::{FrameOutcome, SortingPipeline};
pub use sources::{DetectionSource, HandPoseSource};
