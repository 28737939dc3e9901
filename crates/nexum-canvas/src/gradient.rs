//! Radial gradients with color stops.

use nexum_core::{Point, Rgba};
use tiny_skia::{GradientStop, Shader, SpreadMode, Transform};

use crate::pixmap::skia_color;

/// A position along the gradient and the color at that position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Gradient between two concentric circles, like `createRadialGradient`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    /// Add a stop, keeping stops sorted by offset. Offsets are clamped to `[0, 1]`.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let idx = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(idx, ColorStop { offset, color });
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Stops measured from the center out to the outer radius.
    ///
    /// Everything inside the inner radius takes the first stop's color.
    pub fn centered_stops(&self) -> Vec<ColorStop> {
        let outer = self.outer_radius;
        let inner = self.inner_radius.clamp(0.0, outer.max(0.0));
        if outer <= 0.0 {
            return Vec::new();
        }
        self.stops
            .iter()
            .map(|stop| ColorStop {
                offset: (inner + stop.offset * (outer - inner)) / outer,
                color: stop.color,
            })
            .collect()
    }

    /// Shader in logical coordinates, `None` when there is nothing to paint.
    pub fn shader(&self) -> Option<Shader<'static>> {
        let stops: Vec<GradientStop> = self
            .centered_stops()
            .into_iter()
            .map(|stop| GradientStop::new(stop.offset, skia_color(stop.color)))
            .collect();
        if stops.is_empty() {
            return None;
        }
        let center = tiny_skia::Point::from_xy(self.center.x, self.center.y);
        tiny_skia::RadialGradient::new(
            center,
            center,
            self.outer_radius,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        )
    }
}
