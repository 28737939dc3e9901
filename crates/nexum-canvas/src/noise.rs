//! Two-dimensional gradient noise used to perturb particle drift.

/// Size of the permutation table. Must be a power of two.
const TABLE_SIZE: usize = 64;
const TABLE_MASK: i32 = TABLE_SIZE as i32 - 1;

/// A fixed shuffle of `0..TABLE_SIZE`.
const PERMUTATION: [u8; TABLE_SIZE] = [
    2, 0, 15, 34, 57, 24, 27, 17, 59, 49, 61, 48, 12, 21, 28, 47, 58, 44, 43, 20, 26, 5, 39, 38,
    3, 14, 16, 30, 1, 56, 10, 32, 33, 41, 19, 9, 8, 51, 35, 53, 37, 11, 42, 62, 25, 6, 50, 4, 63,
    31, 29, 7, 36, 23, 18, 22, 13, 46, 40, 45, 60, 55, 54, 52,
];

/// Deterministic gradient noise over the plane.
///
/// Output is continuous and stays roughly within `[-1, 1]`. The generator holds
/// no mutable state, so one instance can be shared by every particle of a
/// renderer.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    /// The permutation written twice so corner lookups never wrap.
    table: [u8; TABLE_SIZE * 2],
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGenerator {
    pub fn new() -> Self {
        let mut table = [0u8; TABLE_SIZE * 2];
        table[..TABLE_SIZE].copy_from_slice(&PERMUTATION);
        table[TABLE_SIZE..].copy_from_slice(&PERMUTATION);
        Self { table }
    }

    /// Sample the noise field at `(x, y)`.
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i32 & TABLE_MASK) as usize;
        let yi = (y0 as i32 & TABLE_MASK) as usize;
        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.table;
        let hash = |cx: usize, cy: usize| p[p[cx] as usize + cy];

        let n00 = grad(hash(xi, yi), xf, yf);
        let n10 = grad(hash(xi + 1, yi), xf - 1.0, yf);
        let n01 = grad(hash(xi, yi + 1), xf, yf - 1.0);
        let n11 = grad(hash(xi + 1, yi + 1), xf - 1.0, yf - 1.0);

        lerp(v, lerp(u, n00, n10), lerp(u, n01, n11))
    }
}

/// Smoothstep weight `3t² − 2t³`.
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of the offset with one of four diagonal gradients picked by `hash`.
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        let noise = NoiseGenerator::new();
        let other = NoiseGenerator::new();
        for i in 0..200 {
            let x = i as f32 * 0.37 - 20.0;
            let y = i as f32 * 0.11 + 3.5;
            assert_eq!(noise.noise(x, y), noise.noise(x, y));
            assert_eq!(noise.noise(x, y), other.noise(x, y));
        }
    }

    #[test]
    fn test_noise_is_zero_on_lattice_points() {
        let noise = NoiseGenerator::new();
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(noise.noise(x as f32, y as f32), 0.0);
            }
        }
    }

    #[test]
    fn test_noise_stays_in_range() {
        let noise = NoiseGenerator::new();
        for i in 0..5000 {
            let x = (i as f32 * 0.173).sin() * 500.0;
            let y = (i as f32 * 0.091).cos() * 500.0 + i as f32 * 0.01;
            let n = noise.noise(x, y);
            assert!(n.is_finite());
            assert!((-1.5..=1.5).contains(&n), "noise({x}, {y}) = {n}");
        }
    }

    #[test]
    fn test_noise_is_continuous() {
        let noise = NoiseGenerator::new();
        let step = 1e-3;
        for i in 0..1000 {
            let x = i as f32 * 0.0531 + 0.25;
            let y = i as f32 * 0.0217 + 7.75;
            let delta = (noise.noise(x, y) - noise.noise(x + step, y + step)).abs();
            assert!(delta < 0.02, "jump of {delta} at ({x}, {y})");
        }
    }

    #[test]
    fn test_noise_varies() {
        let noise = NoiseGenerator::new();
        let samples: Vec<f32> = (0..50).map(|i| noise.noise(i as f32 * 0.5 + 0.25, 0.6)).collect();
        assert!(samples.iter().any(|n| *n > 0.05));
        assert!(samples.iter().any(|n| *n < -0.05));
    }
}
