//! Ambient glow, vignette, scanline and grain layers.

use nexum_core::{Point, Rgba, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::field::wrap;
use crate::gradient::RadialGradient;
use crate::particle::GlowSpot;
use crate::surface::{Rect, Surface};

/// Which effect layers a renderer composites, and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers {
    /// Fill each frame with this color instead of clearing, leaving motion trails.
    pub trail: Option<Rgba>,
    /// Offset of the middle glow stop; the middle stop carries 55% of the center alpha.
    pub glow_mid_stop: f32,
    pub vignette: bool,
    /// Distance between 1px scanlines.
    pub scanline_spacing: Option<f32>,
    pub scanline_color: Rgba,
    /// Grain specks per frame when grain is enabled.
    pub grain_specks: usize,
    pub grain_color: Rgba,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            trail: None,
            glow_mid_stop: 0.5,
            vignette: false,
            scanline_spacing: None,
            scanline_color: Rgba::WHITE.with_alpha(0.01),
            grain_specks: 0,
            grain_color: Rgba::WHITE.with_alpha(0.03),
        }
    }
}

/// Owns the glow spots and layers everything that sits over the particles.
#[derive(Debug, Clone)]
pub struct Compositor {
    spots: Vec<GlowSpot>,
    layers: Layers,
    rng: StdRng,
}

impl Compositor {
    pub fn new(layers: Layers, seed: u64) -> Self {
        Self {
            spots: Vec::new(),
            layers,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// Replace every glow spot.
    pub fn reseed(&mut self, spots: Vec<GlowSpot>) {
        self.spots = spots;
    }

    pub fn glow_spots(&self) -> &[GlowSpot] {
        &self.spots
    }

    /// Prepare the surface for a new frame: clear it, or darken it for trails.
    pub fn begin_frame(&self, surface: &mut dyn Surface) {
        match self.layers.trail {
            Some(fade) => surface.fill(fade),
            None => surface.clear(),
        }
    }

    /// Drift and pulse the glow spots by one frame, wrapping them by their own radius.
    pub fn advance(&mut self, bounds: Size) {
        for spot in &mut self.spots {
            spot.x = wrap(spot.x + spot.vx, bounds.width, spot.radius);
            spot.y = wrap(spot.y + spot.vy, bounds.height, spot.radius);
            spot.pulse_phase += spot.pulse_speed;
        }
    }

    /// All layers in order: glow, vignette, scanlines, grain.
    pub fn composite(&mut self, surface: &mut dyn Surface, size: Size, grain: bool) {
        self.draw_glow(surface);
        if self.layers.vignette {
            draw_vignette(surface, size);
        }
        if let Some(spacing) = self.layers.scanline_spacing {
            draw_scanlines(surface, size, spacing, self.layers.scanline_color);
        }
        if grain {
            self.draw_grain(surface, size);
        }
    }

    pub fn draw_glow(&self, surface: &mut dyn Surface) {
        for spot in &self.spots {
            let radius = spot.current_radius();
            if radius <= 0.0 || spot.opacity <= 0.0 {
                continue;
            }
            let gradient = RadialGradient::new(spot.center(), 0.0, radius)
                .with_stop(0.0, spot.color.with_alpha(spot.opacity))
                .with_stop(
                    self.layers.glow_mid_stop,
                    spot.color.with_alpha(spot.opacity * 0.55),
                )
                .with_stop(1.0, spot.color.with_alpha(0.0));
            surface.fill_radial_gradient(&gradient, Rect::around(spot.center(), radius));
        }
    }

    /// Scatter single-pixel specks. Skipped entirely when there are none to draw.
    pub fn draw_grain(&mut self, surface: &mut dyn Surface, size: Size) {
        if size.is_empty() {
            return;
        }
        for _ in 0..self.layers.grain_specks {
            let at = Point::new(
                self.rng.gen_range(0.0..size.width),
                self.rng.gen_range(0.0..size.height),
            );
            surface.blend_point(at, self.layers.grain_color);
        }
    }
}

/// Darken the edges: transparent inside 30% of the radius, 70% black at the rim.
pub fn draw_vignette(surface: &mut dyn Surface, size: Size) {
    let center = Point::new(size.width / 2.0, size.height / 2.0);
    let max_radius = size.width.max(size.height) * 0.8;
    let gradient = RadialGradient::new(center, max_radius * 0.3, max_radius)
        .with_stop(0.0, Rgba::BLACK.with_alpha(0.0))
        .with_stop(0.6, Rgba::BLACK.with_alpha(0.4))
        .with_stop(1.0, Rgba::BLACK.with_alpha(0.7));
    surface.fill_radial_gradient(&gradient, Rect::new(0.0, 0.0, size.width, size.height));
}

/// One-pixel horizontal lines every `spacing` logical pixels.
pub fn draw_scanlines(surface: &mut dyn Surface, size: Size, spacing: f32, color: Rgba) {
    if spacing < 1.0 {
        return;
    }
    let mut y = 0.0;
    while y < size.height {
        surface.fill_rect(Rect::new(0.0, y, size.width, 1.0), color);
        y += spacing;
    }
}
