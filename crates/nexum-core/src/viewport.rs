//! Viewport geometry and device tier classification.

/// Viewport width (logical px) below which a device counts as constrained.
pub const DEFAULT_BREAKPOINT: f32 = 768.0;

/// A point in logical (CSS-like) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Sentinel used for "no pointer": far enough away to never influence anything.
    pub const OFF_SURFACE: Point = Point::new(-9999.0, -9999.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// A size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Coarse device classification driving the rendering budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceTier {
    /// Narrow viewport: fewer particles, capped links, no grain, single static frame.
    Constrained,
    /// Everything else: full budgets and a continuous animation loop.
    #[default]
    Full,
}

impl DeviceTier {
    /// Classify a viewport width against a breakpoint.
    pub fn classify(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceTier::Constrained
        } else {
            DeviceTier::Full
        }
    }

    pub fn is_constrained(self) -> bool {
        self == DeviceTier::Constrained
    }
}

/// The environment a renderer is mounted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Device tier for this viewport. Evaluated fresh on every call, orientation
    /// changes can cross the breakpoint.
    pub fn tier(&self, breakpoint: f32) -> DeviceTier {
        DeviceTier::classify(self.width, breakpoint)
    }

    /// Ratio actually used for the backing store. Non-finite or non-positive
    /// ratios fall back to 1.
    pub fn effective_ratio(&self, cap: f32) -> f32 {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(cap)
    }
}
