//! Per-frame particle simulation.

use nexum_core::{Point, Size};

use crate::noise::NoiseGenerator;
use crate::particle::Particle;

/// How a field derives particle velocity each frame.
///
/// One model is fixed per renderer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Velocity is recomputed from scratch every frame: a slow sinusoid of
    /// time plus a noise term. Nothing carries over between frames.
    Drift {
        /// Multiplier on time inside the sinusoid.
        time_scale: f32,
        /// Sinusoid amplitude in px/frame.
        amplitude: f32,
        /// Noise amplitude in px/frame.
        noise_amplitude: f32,
        /// Multiplier on time when sampling noise.
        noise_time_scale: f32,
        /// Multiplier on position when sampling noise.
        noise_space_scale: f32,
    },
    /// Velocity is integrated and multiplied by `damping` every frame. A small
    /// noise nudge keeps the field from settling.
    Damped { damping: f32, noise_amplitude: f32 },
    /// Each particle keeps its seeded velocity and adds a sinusoid driven by
    /// its own phase, which advances by `phase_step` per frame.
    Orbit { phase_step: f32, amplitude: f32 },
}

/// Pull toward the pointer for particles within `radius`.
///
/// The force is `strength * direction / (distance + 1)` in px/frame, so it is
/// strongest at mid range and never singular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerForce {
    pub radius: f32,
    pub strength: f32,
}

/// A fixed-size particle population and the rules that move it.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    noise: NoiseGenerator,
    motion: Motion,
    pointer_force: Option<PointerForce>,
    wrap_margin: f32,
}

impl ParticleField {
    pub fn new(motion: Motion, wrap_margin: f32) -> Self {
        Self {
            particles: Vec::new(),
            noise: NoiseGenerator::new(),
            motion,
            pointer_force: None,
            wrap_margin,
        }
    }

    pub fn with_pointer_force(mut self, force: PointerForce) -> Self {
        self.pointer_force = Some(force);
        self
    }

    /// Replace the whole population. Old particles are discarded, not rescaled.
    pub fn reseed(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn wrap_margin(&self) -> f32 {
        self.wrap_margin
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Advance every particle by one frame.
    ///
    /// `time` is the renderer's animation clock, `pointer` the last known
    /// pointer position ([`Point::OFF_SURFACE`] when there is none).
    pub fn step(&mut self, time: f32, pointer: Point, bounds: Size) {
        let noise = &self.noise;
        let force = self.pointer_force;
        let margin = self.wrap_margin;
        let motion = self.motion;

        for p in &mut self.particles {
            let (fx, fy) = force
                .map(|f| pointer_pull(p.position(), pointer, f))
                .unwrap_or((0.0, 0.0));

            match motion {
                Motion::Drift {
                    time_scale,
                    amplitude,
                    noise_amplitude,
                    noise_time_scale,
                    noise_space_scale,
                } => {
                    let nt = time * noise_time_scale;
                    let nx = noise.noise(nt + p.noise_offset_x, p.y * noise_space_scale);
                    let ny = noise.noise(nt + p.noise_offset_y, p.x * noise_space_scale);
                    let theta = time * time_scale + p.phase;
                    p.vx = theta.sin() * amplitude + nx * noise_amplitude + fx;
                    p.vy = (theta + 1.0).cos() * amplitude + ny * noise_amplitude + fy;
                    p.x += p.vx;
                    p.y += p.vy;
                }
                Motion::Damped {
                    damping,
                    noise_amplitude,
                } => {
                    let nx = noise.noise(time + p.noise_offset_x, p.phase);
                    let ny = noise.noise(time + p.noise_offset_y, p.phase + 0.5);
                    p.vx += fx + nx * noise_amplitude;
                    p.vy += fy + ny * noise_amplitude;
                    p.x += p.vx;
                    p.y += p.vy;
                    p.vx *= damping;
                    p.vy *= damping;
                }
                Motion::Orbit {
                    phase_step,
                    amplitude,
                } => {
                    p.phase += phase_step;
                    p.x += p.vx + p.phase.sin() * amplitude + fx;
                    p.y += p.vy + (p.phase * 0.7).cos() * amplitude + fy;
                }
            }

            p.x = wrap(p.x, bounds.width, margin);
            p.y = wrap(p.y, bounds.height, margin);
        }
    }
}

fn pointer_pull(at: Point, pointer: Point, force: PointerForce) -> (f32, f32) {
    let d2 = at.distance_squared(pointer);
    if d2 >= force.radius * force.radius {
        return (0.0, 0.0);
    }
    let d = d2.sqrt();
    let k = force.strength / (d + 1.0);
    ((pointer.x - at.x) * k, (pointer.y - at.y) * k)
}

/// Toroidal wrap: leaving past `-margin` re-enters at `extent + margin` and
/// vice versa. Non-finite coordinates restart at the origin.
pub fn wrap(v: f32, extent: f32, margin: f32) -> f32 {
    if !v.is_finite() {
        0.0
    } else if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const DRIFT: Motion = Motion::Drift {
        time_scale: 0.002,
        amplitude: 0.15,
        noise_amplitude: 0.05,
        noise_time_scale: 0.3,
        noise_space_scale: 0.0005,
    };

    fn population(n: usize, size: Size, seed: u64) -> Vec<Particle> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Particle {
                x: rng.gen_range(0.0..size.width),
                y: rng.gen_range(0.0..size.height),
                vx: rng.gen_range(-0.2..0.2),
                vy: rng.gen_range(-0.2..0.2),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                noise_offset_x: rng.gen_range(0.0..1000.0),
                noise_offset_y: rng.gen_range(0.0..1000.0),
                ..Default::default()
            })
            .collect()
    }

    fn assert_in_bounds(field: &ParticleField, size: Size) {
        let m = field.wrap_margin();
        for p in field.particles() {
            assert!(p.x >= -m && p.x <= size.width + m, "x = {}", p.x);
            assert!(p.y >= -m && p.y <= size.height + m, "y = {}", p.y);
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(-21.0, 100.0, 20.0), 120.0);
        assert_eq!(wrap(121.0, 100.0, 20.0), -20.0);
        assert_eq!(wrap(-20.0, 100.0, 20.0), -20.0);
        assert_eq!(wrap(50.0, 100.0, 20.0), 50.0);
        assert_eq!(wrap(f32::NAN, 100.0, 20.0), 0.0);
    }

    #[test]
    fn test_wrap_invariant_holds_for_every_motion() {
        let size = Size::new(320.0, 200.0);
        let motions = [
            DRIFT,
            Motion::Damped {
                damping: 0.985,
                noise_amplitude: 0.003,
            },
            Motion::Orbit {
                phase_step: 0.003,
                amplitude: 0.08,
            },
        ];
        for (i, motion) in motions.into_iter().enumerate() {
            let mut field = ParticleField::new(motion, 25.0).with_pointer_force(PointerForce {
                radius: 240.0,
                strength: 0.5,
            });
            field.reseed(population(40, size, i as u64));
            let mut time = 0.0;
            for frame in 0..2000 {
                time += 0.016;
                let pointer = Point::new((frame % 320) as f32, (frame % 200) as f32);
                field.step(time, pointer, size);
                assert_in_bounds(&field, size);
            }
            assert_eq!(field.len(), 40);
        }
    }

    #[test]
    fn test_particles_cross_the_edge_instead_of_piling_up() {
        let size = Size::new(100.0, 100.0);
        let mut field = ParticleField::new(
            Motion::Orbit {
                phase_step: 0.0,
                amplitude: 0.0,
            },
            20.0,
        );
        field.reseed(vec![Particle {
            x: 119.5,
            y: 50.0,
            vx: 1.0,
            ..Default::default()
        }]);
        field.step(0.0, Point::OFF_SURFACE, size);
        assert_eq!(field.particles()[0].x, -20.0);
    }

    #[test]
    fn test_drift_velocity_is_rederived() {
        let size = Size::new(500.0, 500.0);
        let mut a = ParticleField::new(DRIFT, 20.0);
        let mut b = ParticleField::new(DRIFT, 20.0);
        let mut seeded = population(1, size, 7);
        a.reseed(seeded.clone());
        seeded[0].vx = 50.0;
        seeded[0].vy = -50.0;
        b.reseed(seeded);

        a.step(1.0, Point::OFF_SURFACE, size);
        b.step(1.0, Point::OFF_SURFACE, size);
        assert_eq!(a.particles()[0].vx, b.particles()[0].vx);
        assert_eq!(a.particles()[0].vy, b.particles()[0].vy);
        assert!(a.particles()[0].vx.abs() <= 0.15 + 0.05 * 1.5);
    }

    #[test]
    fn test_damped_velocity_decays_without_input() {
        let mut field = ParticleField::new(
            Motion::Damped {
                damping: 0.985,
                noise_amplitude: 0.0,
            },
            30.0,
        );
        field.reseed(vec![Particle {
            x: 50.0,
            y: 50.0,
            vx: 0.3,
            ..Default::default()
        }]);
        for _ in 0..300 {
            field.step(0.0, Point::OFF_SURFACE, Size::new(100.0, 100.0));
        }
        assert!(field.particles()[0].vx.abs() < 0.01);
    }

    #[test]
    fn test_pointer_attracts_nearby_particles() {
        let size = Size::new(1000.0, 1000.0);
        let pointer = Point::new(600.0, 500.0);
        let mut field = ParticleField::new(
            Motion::Damped {
                damping: 0.985,
                noise_amplitude: 0.0,
            },
            30.0,
        )
        .with_pointer_force(PointerForce {
            radius: 240.0,
            strength: 0.006,
        });
        field.reseed(vec![
            Particle {
                x: 500.0,
                y: 500.0,
                ..Default::default()
            },
            Particle {
                x: 100.0,
                y: 100.0,
                ..Default::default()
            },
        ]);
        let before = field.particles()[0].position().distance(pointer);
        for _ in 0..30 {
            field.step(0.0, pointer, size);
        }
        let after = field.particles()[0].position().distance(pointer);
        assert!(after < before);
        // out of range, untouched
        assert_eq!(field.particles()[1].position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_off_surface_pointer_has_no_effect() {
        let pull = pointer_pull(
            Point::new(0.0, 0.0),
            Point::OFF_SURFACE,
            PointerForce {
                radius: 250.0,
                strength: 1.0,
            },
        );
        assert_eq!(pull, (0.0, 0.0));
    }
}
