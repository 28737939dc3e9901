//! Constellation: a dense node graph linked by proximity, drawn over a clear surface.

use nexum_core::{BackgroundStyle, RenderOptions, Rgba, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{FrameContext, Renderer};
use crate::budget::{Budgets, RenderConfig, TierBudget};
use crate::compositor::{Compositor, Layers};
use crate::field::{Motion, ParticleField, PointerForce};
use crate::gradient::RadialGradient;
use crate::links::{draw_links, LinkColor, LinkStyle};
use crate::manager::Listener;
use crate::particle::{GlowSpot, Particle};
use crate::surface::{Rect, Surface};

const BUDGETS: Budgets = Budgets {
    full: TierBudget {
        particles: 110,
        glow_spots: 0,
        max_link_distance: 190.0,
        link_cap: None,
        grain: false,
    },
    constrained: TierBudget {
        particles: 32,
        glow_spots: 0,
        max_link_distance: 120.0,
        link_cap: Some(2),
        grain: false,
    },
};

const MOTION: Motion = Motion::Damped {
    damping: 0.985,
    noise_amplitude: 0.003,
};

/// Blue, purple and orange follow the accent.
const PALETTE_TAIL: [Rgba; 3] = [
    Rgba::rgb(0x3b, 0x82, 0xf6),
    Rgba::rgb(0x8b, 0x5c, 0xf6),
    Rgba::rgb(0xf5, 0x9e, 0x0b),
];

const WRAP_MARGIN: f32 = 30.0;
/// Halo radius as a multiple of the node radius.
const HALO: f32 = 7.0;
/// Halo center alpha (`0x33`).
const HALO_ALPHA: f32 = 0x33 as f32 / 255.0;

const LINKS: LinkStyle = LinkStyle {
    color: LinkColor::FromParticle,
    max_alpha: 0.14,
    width: 1.0,
};

const LISTENERS: &[Listener] = &[Listener::Resize, Listener::PointerMove, Listener::PointerLeave];

#[derive(Debug)]
pub struct Constellation {
    palette: [Rgba; 4],
    field: ParticleField,
    compositor: Compositor,
    rng: StdRng,
}

impl Constellation {
    pub fn new(options: RenderOptions, seed: u64) -> Self {
        let [blue, purple, orange] = PALETTE_TAIL;
        Self {
            palette: [options.accent, blue, purple, orange],
            field: ParticleField::new(MOTION, WRAP_MARGIN).with_pointer_force(PointerForce {
                radius: 240.0,
                strength: 0.006,
            }),
            compositor: Compositor::new(Layers::default(), seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn node(&mut self, size: Size) -> Particle {
        let color = self.palette[self.rng.gen_range(0..self.palette.len())];
        Particle {
            x: self.rng.gen_range(0.0..size.width),
            y: self.rng.gen_range(0.0..size.height),
            vx: self.rng.gen_range(-0.175..0.175),
            vy: self.rng.gen_range(-0.175..0.175),
            radius: self.rng.gen_range(0.8..2.4),
            opacity: 1.0,
            color,
            phase: self.rng.gen_range(0.0..100.0),
            noise_offset_x: self.rng.gen_range(0.0..1000.0),
            noise_offset_y: self.rng.gen_range(0.0..1000.0),
            ..Default::default()
        }
    }
}

impl Renderer for Constellation {
    fn style(&self) -> BackgroundStyle {
        BackgroundStyle::Constellation
    }

    fn budgets(&self) -> Budgets {
        BUDGETS
    }

    fn listeners(&self) -> &'static [Listener] {
        LISTENERS
    }

    fn seed(&mut self, config: &RenderConfig, size: Size) {
        let nodes = (0..config.particle_count).map(|_| self.node(size)).collect();
        self.field.reseed(nodes);
        debug!(nodes = self.field.len(), "seeded constellation");
    }

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>) {
        self.compositor.begin_frame(surface);
        self.field.step(frame.time, frame.pointer, frame.size);

        let config = frame.config;
        draw_links(
            surface,
            self.field.particles(),
            |p| p.position(),
            config.max_link_distance,
            config.link_cap,
            &LINKS,
        );

        for node in self.field.particles() {
            let center = node.position();
            let halo_radius = node.radius * HALO;
            let halo = RadialGradient::new(center, 0.0, halo_radius)
                .with_stop(0.0, node.color.with_alpha(HALO_ALPHA))
                .with_stop(1.0, node.color.with_alpha(0.0));
            surface.fill_radial_gradient(&halo, Rect::around(center, halo_radius));
            surface.fill_circle(center, node.radius, node.color.fade(node.opacity));
        }

        self.compositor.composite(surface, frame.size, config.grain);
    }

    fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    fn glow_spots(&self) -> &[GlowSpot] {
        self.compositor.glow_spots()
    }
}
