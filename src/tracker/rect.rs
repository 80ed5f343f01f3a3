//! Axis-aligned bounding box geometry.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Bounding box stored as top-left corner plus size (TLWH).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from two opposite corners given in any order.
    #[inline]
    pub fn from_corners(a: Point2<f32>, b: Point2<f32>) -> Self {
        let x1 = a.x.min(b.x);
        let y1 = a.y.min(b.y);
        Self {
            x: x1,
            y: y1,
            width: a.x.max(b.x) - x1,
            height: a.y.max(b.y) - y1,
        }
    }

    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f32> {
        Point2::new(self.x + self.width, self.y + self.height)
    }

    /// Euclidean distance from `p` to the nearest point of the box; zero inside.
    pub fn distance_to(&self, p: &Point2<f32>) -> f32 {
        let [x1, y1, x2, y2] = self.to_tlbr();
        let dx = (x1 - p.x).max(0.0).max(p.x - x2);
        let dy = (y1 - p.y).max(0.0).max(p.y - y2);
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(rect.top_left(), Point2::new(10.0, 20.0));
        assert_eq!(rect.bottom_right(), Point2::new(40.0, 60.0));
    }

    #[test]
    fn test_from_corners_any_order() {
        let rect = Rect::from_corners(Point2::new(40.0, 60.0), Point2::new(10.0, 20.0));
        assert_eq!(rect, Rect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_distance_inside_is_zero() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.distance_to(&Point2::new(5.0, 5.0)), 0.0);
    }

    #[test]
    fn test_distance_outside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((rect.distance_to(&Point2::new(13.0, 14.0)) - 5.0).abs() < 1e-6);
        assert!((rect.distance_to(&Point2::new(-2.0, 5.0)) - 2.0).abs() < 1e-6);
    }
}
