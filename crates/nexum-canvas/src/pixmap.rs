//! Software RGBA surface backed by tiny-skia.

use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;

use nexum_core::{Point, Rgba};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Stroke, Transform};

use crate::gradient::RadialGradient;
use crate::surface::{Rect, Surface, SurfaceError};

/// Largest backing store we agree to allocate.
const MAX_PIXELS: u64 = 1 << 26;

/// RGBA pixel grid mirroring an HTML canvas backing store.
pub struct Pixmap {
    pixmap: tiny_skia::Pixmap,
    transform: Transform,
}

impl Pixmap {
    /// Create a transparent pixmap with an identity transform.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            transform: Transform::identity(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Current logical-to-device scale.
    pub fn scale(&self) -> f32 {
        self.transform.sx
    }

    /// Pixel at device coordinates, with straight alpha.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(
            c.red(),
            c.green(),
            c.blue(),
            c.alpha() as f32 / 255.0,
        ))
    }

    /// Pixel at device coordinates flattened onto an opaque background.
    pub fn composite_over(&self, x: u32, y: u32, background: Rgba) -> Rgba {
        let Some(c) = self.pixmap.pixel(x, y) else {
            return background;
        };
        let rest = 1.0 - c.alpha() as f32 / 255.0;
        let over = |src: u8, dst: u8| (src as f32 + dst as f32 * rest).round().min(255.0) as u8;
        Rgba::rgb(
            over(c.red(), background.r),
            over(c.green(), background.g),
            over(c.blue(), background.b),
        )
    }

    /// Sum of alpha over all pixels; handy for checking that something was drawn.
    pub fn coverage(&self) -> f32 {
        self.pixmap
            .pixels()
            .iter()
            .map(|p| p.alpha() as f32 / 255.0)
            .sum()
    }

    fn device(&self, p: Point) -> (f32, f32) {
        (p.x * self.transform.sx, p.y * self.transform.sy)
    }

    /// Paint the single device pixel under a logical point.
    fn fill_device_pixel(&mut self, at: Point, color: Rgba) {
        let (x, y) = self.device(at);
        if let Some(rect) = tiny_skia::Rect::from_xywh(x.floor(), y.floor(), 1.0, 1.0) {
            let mut paint = paint(color);
            paint.anti_alias = false;
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("scale", &self.scale())
            .finish()
    }
}

impl Surface for Pixmap {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.pixmap = allocate(width, height)?;
        Ok(())
    }

    fn device_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn set_transform(&mut self, scale: f32) {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.transform = Transform::from_scale(scale, scale);
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill(&mut self, color: Rgba) {
        let (width, height) = self.device_size();
        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) {
            self.pixmap
                .fill_rect(rect, &paint(color), self.transform, None);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius * self.scale() < 0.5 {
            self.fill_device_pixel(center, color);
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    fn fill_diamond(&mut self, center: Point, size: f32, color: Rgba) {
        let half = size * FRAC_1_SQRT_2;
        if half * self.scale() < 0.5 {
            self.fill_device_pixel(center, color);
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(center.x, center.y - half);
        pb.line_to(center.x + half, center.y);
        pb.line_to(center.x, center.y + half);
        pb.line_to(center.x - half, center.y);
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        // Lines thinner than a device pixel become faded one-pixel hairlines.
        let device_width = width * self.scale();
        let (width, color) = if device_width < 1.0 {
            (
                1.0 / self.scale(),
                color.fade(width.clamp(0.0, 1.0)),
            )
        } else {
            (width, color)
        };

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, self.transform, None);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, bounds: Rect) {
        let Some(shader) = gradient.shader() else {
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height)
        else {
            return;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        self.pixmap.fill_rect(rect, &paint, self.transform, None);
    }

    fn blend_point(&mut self, at: Point, color: Rgba) {
        self.fill_device_pixel(at, color);
    }
}

fn allocate(width: u32, height: u32) -> Result<tiny_skia::Pixmap, SurfaceError> {
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(SurfaceError::TooLarge { width, height });
    }
    tiny_skia::Pixmap::new(width, height).ok_or(SurfaceError::Empty { width, height })
}

pub(crate) fn skia_color(c: Rgba) -> Color {
    let mut color = Color::from_rgba8(c.r, c.g, c.b, 255);
    color.set_alpha(c.a);
    color
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}
