//! Traits for the external detector and hand-pose model.

use crate::detection::{HandPose, RawDetection};

/// Object detector run on each camera frame.
///
/// # Example
///
/// ```ignore
/// use binsight::{DetectionSource, RawDetection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<RawDetection>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource: Send {
    type Error: std::fmt::Display;

    /// Run inference on raw image data.
    ///
    /// Boxes are reported in source-image pixels.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RawDetection>, Self::Error>;
}

/// Hand landmark model run on each camera frame.
pub trait HandPoseSource: Send {
    type Error: std::fmt::Display;

    fn detect_hands(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<HandPose>, Self::Error>;
}
