//! Mapping detector and hand-model coordinates into screen space.

use nalgebra::{Matrix3, Point2, Vector2};

use crate::detection::{HandPose, PointSpace};
use crate::error::TrackerError;
use crate::tracker::Rect;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Transform from the camera image to the preview on screen.
///
/// The preview fills the screen while keeping the image aspect ratio, so
/// the image is scaled to cover it and the overflow is cropped evenly on
/// both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateContext {
    source: Size,
    destination: Size,
    image_to_screen: Matrix3<f32>,
    normalized_to_screen: Matrix3<f32>,
}

impl CoordinateContext {
    pub fn new(source: Size, destination: Size) -> Result<Self, TrackerError> {
        if !source.is_valid() {
            return Err(TrackerError::InvalidCoordinateContext(format!(
                "source image size {}x{}",
                source.width, source.height
            )));
        }
        if !destination.is_valid() {
            return Err(TrackerError::InvalidCoordinateContext(format!(
                "destination screen size {}x{}",
                destination.width, destination.height
            )));
        }

        let scale = (destination.width / source.width).max(destination.height / source.height);
        let offset = Vector2::new(
            (destination.width - source.width * scale) / 2.0,
            (destination.height - source.height * scale) / 2.0,
        );
        #[rustfmt::skip]
        let image_to_screen = Matrix3::new(
            scale, 0.0, offset.x,
            0.0, scale, offset.y,
            0.0, 0.0, 1.0,
        );
        let normalized_to_screen = image_to_screen
            * Matrix3::new_nonuniform_scaling(&Vector2::new(source.width, source.height));

        Ok(Self {
            source,
            destination,
            image_to_screen,
            normalized_to_screen,
        })
    }

    pub fn source(&self) -> Size {
        self.source
    }

    pub fn destination(&self) -> Size {
        self.destination
    }

    pub fn map_point(&self, p: &Point2<f32>, space: PointSpace) -> Point2<f32> {
        match space {
            PointSpace::Normalized => self.normalized_to_screen.transform_point(p),
            PointSpace::ImagePixels => self.image_to_screen.transform_point(p),
            PointSpace::Screen => *p,
        }
    }

    /// Map a source-image box into screen space.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        Rect::from_corners(
            self.image_to_screen.transform_point(&rect.top_left()),
            self.image_to_screen.transform_point(&rect.bottom_right()),
        )
    }

    pub fn map_hand(&self, hand: &HandPose) -> HandPose {
        HandPose {
            landmarks: hand
                .landmarks
                .iter()
                .map(|p| self.map_point(p, hand.space))
                .collect(),
            space: PointSpace::Screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point2<f32>, b: Point2<f32>) -> bool {
        (a - b).norm() < 1e-3
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(CoordinateContext::new(Size::new(0.0, 480.0), Size::new(100.0, 100.0)).is_err());
        assert!(CoordinateContext::new(Size::new(640.0, 480.0), Size::new(f32::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_identity_when_sizes_match() {
        let ctx = CoordinateContext::new(Size::new(640.0, 480.0), Size::new(640.0, 480.0)).unwrap();
        let p = Point2::new(100.0, 50.0);
        assert!(approx(ctx.map_point(&p, PointSpace::ImagePixels), p));
        assert!(approx(
            ctx.map_point(&Point2::new(0.5, 0.5), PointSpace::Normalized),
            Point2::new(320.0, 240.0)
        ));
    }

    #[test]
    fn test_cover_crop_centers_image() {
        // 640x480 image shown on a 480x480 screen: scale 1, 80px cropped per side.
        let ctx = CoordinateContext::new(Size::new(640.0, 480.0), Size::new(480.0, 480.0)).unwrap();
        assert!(approx(
            ctx.map_point(&Point2::new(80.0, 0.0), PointSpace::ImagePixels),
            Point2::new(0.0, 0.0)
        ));
        assert!(approx(
            ctx.map_point(&Point2::new(0.5, 0.5), PointSpace::Normalized),
            Point2::new(240.0, 240.0)
        ));
    }

    #[test]
    fn test_both_streams_land_in_same_space() {
        let ctx = CoordinateContext::new(Size::new(480.0, 640.0), Size::new(1080.0, 1920.0)).unwrap();
        let pixel = Point2::new(120.0, 320.0);
        let normalized = Point2::new(120.0 / 480.0, 320.0 / 640.0);
        assert!(approx(
            ctx.map_point(&pixel, PointSpace::ImagePixels),
            ctx.map_point(&normalized, PointSpace::Normalized)
        ));
    }

    #[test]
    fn test_map_rect_scales() {
        let ctx = CoordinateContext::new(Size::new(100.0, 100.0), Size::new(200.0, 200.0)).unwrap();
        let mapped = ctx.map_rect(&Rect::new(10.0, 10.0, 20.0, 30.0));
        assert!((mapped.x - 20.0).abs() < 1e-4);
        assert!((mapped.width - 40.0).abs() < 1e-4);
        assert!((mapped.height - 60.0).abs() < 1e-4);
    }
}
