//! Neural canvas: slow noise-driven drift under large accent glows.

use std::f32::consts::TAU;

use nexum_core::{BackgroundStyle, RenderOptions, Rgba, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{FrameContext, Renderer};
use crate::budget::{Budgets, RenderConfig, TierBudget};
use crate::compositor::{Compositor, Layers};
use crate::field::{Motion, ParticleField, PointerForce};
use crate::links::{draw_links, LinkColor, LinkStyle};
use crate::manager::Listener;
use crate::particle::{GlowSpot, Particle, ParticleKind};
use crate::surface::Surface;

const BUDGETS: Budgets = Budgets {
    full: TierBudget {
        particles: 32,
        glow_spots: 5,
        max_link_distance: 0.0,
        link_cap: None,
        grain: false,
    },
    constrained: TierBudget {
        particles: 12,
        glow_spots: 3,
        max_link_distance: 0.0,
        link_cap: Some(2),
        grain: false,
    },
};

const MOTION: Motion = Motion::Drift {
    time_scale: 0.002,
    amplitude: 0.15,
    noise_amplitude: 0.05,
    noise_time_scale: 0.3,
    noise_space_scale: 0.0005,
};

/// Slows the shared clock down for this renderer.
const TIME_SCALE: f32 = 0.6;
const ACCENT_SHARE: f64 = 0.25;
const WRAP_MARGIN: f32 = 20.0;
/// Center alpha of a glow spot (`0x22`).
const GLOW_ALPHA: f32 = 0x22 as f32 / 255.0;

const LISTENERS: &[Listener] = &[Listener::Resize, Listener::PointerMove, Listener::PointerLeave];

#[derive(Debug)]
pub struct NeuralCanvas {
    accent: Rgba,
    field: ParticleField,
    compositor: Compositor,
    rng: StdRng,
}

impl NeuralCanvas {
    pub fn new(options: RenderOptions, seed: u64) -> Self {
        let layers = Layers {
            trail: Some(Rgba::BLACK.with_alpha(0.1)),
            glow_mid_stop: 0.3,
            scanline_spacing: Some(6.0),
            ..Layers::default()
        };
        Self {
            accent: options.accent,
            field: ParticleField::new(MOTION, WRAP_MARGIN).with_pointer_force(PointerForce {
                radius: 250.0,
                strength: 0.02,
            }),
            compositor: Compositor::new(layers, seed ^ 0x9e37_79b9),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn particle(&mut self, size: Size) -> Particle {
        let accent = self.rng.gen_bool(ACCENT_SHARE);
        Particle {
            x: self.rng.gen_range(0.0..size.width),
            y: self.rng.gen_range(0.0..size.height),
            radius: if accent { 1.5 } else { 1.0 },
            opacity: 1.0,
            kind: if accent {
                ParticleKind::Accent
            } else {
                ParticleKind::Dot
            },
            color: if accent {
                self.accent
            } else {
                Rgba::WHITE.with_alpha(0.4)
            },
            phase: self.rng.gen_range(0.0..TAU),
            noise_offset_x: self.rng.gen_range(0.0..1000.0),
            noise_offset_y: self.rng.gen_range(0.0..1000.0),
            ..Default::default()
        }
    }

    fn glow_spot(&mut self, size: Size) -> GlowSpot {
        GlowSpot {
            x: self.rng.gen_range(0.0..size.width),
            y: self.rng.gen_range(0.0..size.height),
            radius: self.rng.gen_range(800.0..1200.0),
            opacity: GLOW_ALPHA,
            vx: self.rng.gen_range(-0.01..0.01),
            vy: self.rng.gen_range(-0.01..0.01),
            color: self.accent,
            ..Default::default()
        }
    }
}

impl Renderer for NeuralCanvas {
    fn style(&self) -> BackgroundStyle {
        BackgroundStyle::Neural
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
        let spots = (0..config.glow_spot_count)
            .map(|_| self.glow_spot(size))
            .collect();
        self.field.reseed(particles);
        self.compositor.reseed(spots);
        debug!(
            particles = self.field.len(),
            glow_spots = config.glow_spot_count,
            "seeded neural canvas"
        );
    }

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        self.compositor.begin_frame(surface);
        self.field.step(frame.time * TIME_SCALE, frame.pointer, frame.size);

        let config = frame.config;
        if config.max_link_distance > 0.0 {
            let style = LinkStyle {
                color: LinkColor::Fixed(self.accent),
                max_alpha: 0.12,
                width: 0.5,
            };
            draw_links(
                surface,
                self.field.particles(),
                |p| p.position(),
                config.max_link_distance,
                config.link_cap,
                &style,
            );
        }

        for p in self.field.particles() {
            surface.fill_circle(p.position(), p.radius, p.color.fade(p.opacity));
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
