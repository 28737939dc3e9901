//! A surface that records draw calls instead of rasterizing them.

use nexum_core::{Point, Rgba};

use crate::gradient::RadialGradient;
use crate::surface::{Rect, Surface, SurfaceError};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Fill(Rgba),
    Rect { rect: Rect, paint: Rgba },
    Circle { center: Point, radius: f32, paint: Rgba },
    Diamond { center: Point, size: f32, paint: Rgba },
    Line { from: Point, to: Point, width: f32, paint: Rgba },
    Gradient { center: Point, outer_radius: f32, bounds: Rect },
    Point { at: Point, paint: Rgba },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub resizes: usize,
    /// Fail every resize when set.
    pub refuse_resize: bool,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if self.refuse_resize {
            return Err(SurfaceError::TooLarge { width, height });
        }
        self.width = width;
        self.height = height;
        self.resizes += 1;
        Ok(())
    }

    fn device_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_transform(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill(&mut self, paint: Rgba) {
        self.ops.push(Op::Fill(paint));
    }

    fn fill_rect(&mut self, rect: Rect, paint: Rgba) {
        self.ops.push(Op::Rect { rect, paint });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: Rgba) {
        self.ops.push(Op::Circle {
            center,
            radius,
            paint,
        });
    }

    fn fill_diamond(&mut self, center: Point, size: f32, paint: Rgba) {
        self.ops.push(Op::Diamond {
            center,
            size,
            paint,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: Rgba) {
        self.ops.push(Op::Line {
            from,
            to,
            width,
            paint,
        });
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, bounds: Rect) {
        self.ops.push(Op::Gradient {
            center: gradient.center,
            outer_radius: gradient.outer_radius,
            bounds,
        });
    }

    fn blend_point(&mut self, at: Point, paint: Rgba) {
        self.ops.push(Op::Point { at, paint });
    }
}
