/// Perspective projection and screen mapping
use nalgebra::{Point2, Point3};

/// Multiplier applied to camera-space depth before the perspective divide
pub const DEPTH_SCALE: f32 = 0.25;

/// Smallest depth the divide is allowed to see
pub const DEPTH_EPSILON: f32 = 0.0001;

/// Project a camera-space point to screen-normalized coordinates.
///
/// Points on or behind the view plane are squashed onto a tiny positive depth
/// instead of being discarded; culling them is the visibility filter's job.
pub fn project_to_2d(point: &Point3<f32>, focal_length: f32) -> Point2<f32> {
    let mut depth = point.z * DEPTH_SCALE;
    if point.z == 0.0 || depth <= 0.0 {
        depth = DEPTH_EPSILON;
    }

    // Saturate rather than overflow to infinity for huge coordinates
    let x = (focal_length * point.x / depth).clamp(-f32::MAX, f32::MAX);
    let y = (focal_length * point.y / depth).clamp(-f32::MAX, f32::MAX);

    Point2::new(x, y)
}

/// Maps screen-normalized coordinates to pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Pixels per unit of projected coordinate
    pub pixel_scale: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_scale: f32) -> Self {
        Self {
            width,
            height,
            pixel_scale,
        }
    }

    /// Convert to pixels, origin at the center, Y pointing down
    pub fn to_screen(&self, projected: &Point2<f32>) -> Point2<f32> {
        Point2::new(
            self.width as f32 / 2.0 + projected.x * self.pixel_scale,
            self.height as f32 / 2.0 - projected.y * self.pixel_scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600, 100.0)
    }
}
