//! Particle and glow spot records.

use nexum_core::{Point, Rgba};

/// Whether a particle is a neutral dot or rendered in the accent style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleKind {
    #[default]
    Dot,
    /// Larger, brighter, tinted with the configured accent.
    Accent,
}

/// One animated point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Particle {
    /// Position in surface-local logical pixels.
    pub x: f32,
    pub y: f32,
    /// Pseudo-depth; only scales the display size.
    pub z: f32,
    pub vx: f32,
    pub vy: f32,
    /// Base display radius.
    pub radius: f32,
    /// Multiplier applied to the paint alpha.
    pub opacity: f32,
    pub kind: ParticleKind,
    pub color: Rgba,
    /// Drift phase, decorrelates the sinusoidal motion.
    pub phase: f32,
    /// Offsets into the noise field, decorrelate the noise motion.
    pub noise_offset_x: f32,
    pub noise_offset_y: f32,
}

impl Particle {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_accent(&self) -> bool {
        self.kind == ParticleKind::Accent
    }
}

/// A large, slow-drifting radial gradient used for ambient light.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlowSpot {
    pub x: f32,
    pub y: f32,
    /// Base radius before pulsing.
    pub radius: f32,
    /// Alpha at the gradient center.
    pub opacity: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgba,
    pub pulse_phase: f32,
    /// Phase advance per frame; zero disables pulsing.
    pub pulse_speed: f32,
    /// Relative radius swing while pulsing.
    pub pulse_amplitude: f32,
}

impl GlowSpot {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Radius after applying the breathing pulse.
    pub fn current_radius(&self) -> f32 {
        self.radius * (1.0 + self.pulse_phase.sin() * self.pulse_amplitude)
    }
}
