//! The drawing surface a renderer owns.

use nexum_core::{Point, Rgba};

use crate::gradient::RadialGradient;

/// Why a surface could not be obtained or resized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface is unavailable in this environment")]
    Unavailable,
    #[error("backing store of {width}x{height} device pixels is empty")]
    Empty { width: u32, height: u32 },
    #[error("backing store of {width}x{height} device pixels is too large")]
    TooLarge { width: u32, height: u32 },
}

/// An axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * radius` centered on `center`.
    pub fn around(center: Point, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }
}

/// Subset of a 2D canvas context used by the renderers.
///
/// All drawing coordinates are logical; the surface maps them to device pixels
/// with the scale set by [`Surface::set_transform`]. Painting uses source-over
/// blending.
pub trait Surface {
    /// Set the backing store size in device pixels, discarding its contents.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    /// Backing store size in device pixels.
    fn device_size(&self) -> (u32, u32);

    /// Reset the logical-to-device transform to a uniform scale.
    fn set_transform(&mut self, scale: f32);

    /// Make every pixel fully transparent.
    fn clear(&mut self);

    /// Paint the whole surface with one color.
    fn fill(&mut self, paint: Rgba);

    fn fill_rect(&mut self, rect: Rect, paint: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f32, paint: Rgba);

    /// A square of side `size` rotated by 45 degrees.
    fn fill_diamond(&mut self, center: Point, size: f32, paint: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: Rgba);

    /// Fill `bounds` with a radial gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, bounds: Rect);

    /// Blend a single device pixel at a logical position.
    fn blend_point(&mut self, at: Point, paint: Rgba);
}
