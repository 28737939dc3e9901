//! Roadmap backdrop: depth-scaled particles in the four phase colors, pulsing
//! blobs, and a vignette with scanlines and grain.

use std::f32::consts::{PI, TAU};

use nexum_core::{BackgroundStyle, Point, RenderOptions, Rgba, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{FrameContext, Renderer};
use crate::budget::{Budgets, RenderConfig, TierBudget};
use crate::compositor::{Compositor, Layers};
use crate::field::{Motion, ParticleField};
use crate::links::{draw_links, LinkColor, LinkStyle};
use crate::manager::Listener;
use crate::particle::{GlowSpot, Particle, ParticleKind};
use crate::surface::Surface;

const BUDGETS: Budgets = Budgets {
    full: TierBudget {
        particles: 32,
        glow_spots: 4,
        max_link_distance: 120.0,
        link_cap: None,
        grain: true,
    },
    constrained: TierBudget {
        particles: 8,
        glow_spots: 2,
        max_link_distance: 90.0,
        link_cap: Some(2),
        grain: false,
    },
};

const MOTION: Motion = Motion::Orbit {
    phase_step: 0.003,
    amplitude: 0.08,
};

/// Magenta, emerald and amber follow the accent.
const PHASE_TAIL: [Rgba; 3] = [
    Rgba::rgb(0xd9, 0x46, 0xef),
    Rgba::rgb(0x10, 0xb9, 0x81),
    Rgba::rgb(0xf5, 0x9e, 0x0b),
];

/// Fractional position, pulse speed and starting phase of each blob.
const BLOBS: [(f32, f32, f32, f32); 4] = [
    (0.2, 0.15, 0.0008, 0.0),
    (0.8, 0.3, 0.0009, PI * 0.5),
    (0.25, 0.7, 0.00085, PI),
    (0.75, 0.9, 0.00095, PI * 1.5),
];
const BLOB_RADIUS: f32 = 600.0;
const BLOB_PULSE: f32 = 0.075;
const BLOB_ALPHA: f32 = 0.055;

const WRAP_MARGIN: f32 = 50.0;
/// Depth at which a particle is drawn at its base size.
const FAR_PLANE: f32 = 150.0;
const PARALLAX: f32 = 0.05;
const DIAMOND_SHARE: f64 = 0.15;

const LINKS: LinkStyle = LinkStyle {
    color: LinkColor::Fixed(Rgba::rgb(100, 150, 200)),
    max_alpha: 0.08,
    width: 0.4,
};

const LISTENERS: &[Listener] = &[Listener::Resize, Listener::Scroll];

#[derive(Debug)]
pub struct Roadmap {
    colors: [Rgba; 4],
    field: ParticleField,
    compositor: Compositor,
    rng: StdRng,
}

impl Roadmap {
    pub fn new(options: RenderOptions, seed: u64) -> Self {
        let [magenta, emerald, amber] = PHASE_TAIL;
        let layers = Layers {
            vignette: true,
            scanline_spacing: Some(4.0),
            grain_specks: 100,
            ..Layers::default()
        };
        Self {
            colors: [options.accent, magenta, emerald, amber],
            field: ParticleField::new(MOTION, WRAP_MARGIN),
            compositor: Compositor::new(layers, seed.rotate_left(17)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn particle(&mut self, size: Size) -> Particle {
        let diamond = self.rng.gen_bool(DIAMOND_SHARE);
        let radius = if self.rng.gen_bool(0.15) {
            2.5
        } else {
            self.rng.gen_range(0.8..2.0)
        };
        Particle {
            x: self.rng.gen_range(0.0..size.width),
            y: self.rng.gen_range(0.0..size.height),
            z: self.rng.gen_range(50.0..150.0),
            vx: self.rng.gen_range(-0.075..0.075),
            vy: self.rng.gen_range(-0.075..0.075),
            radius,
            opacity: self.rng.gen_range(0.15..0.45),
            kind: if diamond {
                ParticleKind::Accent
            } else {
                ParticleKind::Dot
            },
            color: self.colors[self.rng.gen_range(0..self.colors.len())],
            phase: self.rng.gen_range(0.0..TAU),
            ..Default::default()
        }
    }

    fn blobs(&self, count: usize, size: Size) -> Vec<GlowSpot> {
        BLOBS
            .iter()
            .zip(self.colors)
            .take(count)
            .map(|(&(fx, fy, pulse_speed, pulse_phase), color)| GlowSpot {
                x: size.width * fx,
                y: size.height * fy,
                radius: BLOB_RADIUS,
                opacity: BLOB_ALPHA,
                color,
                pulse_phase,
                pulse_speed,
                pulse_amplitude: BLOB_PULSE,
                ..Default::default()
            })
            .collect()
    }
}

/// Where a particle is drawn once depth parallax is applied.
///
/// The shifted position wraps vertically like the field itself, so no amount
/// of scrolling carries it off the surface.
fn project(p: &Particle, scroll: f32, height: f32) -> Point {
    let period = height + 2.0 * WRAP_MARGIN;
    let offset = (scroll * PARALLAX * (p.z / FAR_PLANE)).rem_euclid(period);
    let mut y = p.y - if offset.is_finite() { offset } else { 0.0 };
    if y < -WRAP_MARGIN {
        y += period;
    }
    Point::new(p.x, y)
}

impl Renderer for Roadmap {
    fn style(&self) -> BackgroundStyle {
        BackgroundStyle::Roadmap
    }

    fn budgets(&self) -> Budgets {
        BUDGETS
    }

    fn listeners(&self) -> &'static [Listener] {
        LISTENERS
    }

    fn seed(&mut self, config: &RenderConfig, size: Size) {
        let particles = (0..config.particle_count)
            .map(|_| self.particle(size))
            .collect();
        let blobs = self.blobs(config.glow_spot_count, size);
        self.field.reseed(particles);
        self.compositor.reseed(blobs);
        debug!(
            particles = self.field.len(),
            blobs = config.glow_spot_count,
            "seeded roadmap"
        );
    }

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        self.compositor.begin_frame(surface);
        self.field.step(frame.time, frame.pointer, frame.size);

        let config = frame.config;
        let (scroll, height) = (frame.scroll, frame.size.height);
        draw_links(
            surface,
            self.field.particles(),
            |p| project(p, scroll, height),
            config.max_link_distance,
            config.link_cap,
            &LINKS,
        );

        for p in self.field.particles() {
            let at = project(p, scroll, height);
            let size = p.radius * (p.z / FAR_PLANE);
            let paint = p.color.with_alpha(p.opacity * 0.5);
            if p.is_accent() {
                surface.fill_diamond(at, size, paint);
            } else {
                surface.fill_circle(at, size, paint);
            }
        }

        self.compositor.advance(frame.size);
        self.compositor.composite(surface, frame.size, config.grain);
    }

    fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    fn glow_spots(&self) -> &[GlowSpot] {
        self.compositor.glow_spots()
    }
}
