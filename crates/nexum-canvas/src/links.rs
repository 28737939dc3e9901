//! Proximity lines between nearby particles.

use nexum_core::{Point, Rgba};
use tracing::trace;

use crate::particle::Particle;
use crate::surface::Surface;

/// Where a link takes its color from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkColor {
    Fixed(Rgba),
    /// Color of the first particle of the pair.
    FromParticle,
}

/// Stroke parameters for links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    pub color: LinkColor,
    /// Alpha of a link between coincident particles.
    pub max_alpha: f32,
    pub width: f32,
}

/// Opacity factor for a link of length `distance`: 1 at zero distance, falling
/// linearly to exactly 0 at `max_distance` and beyond.
pub fn link_opacity(distance: f32, max_distance: f32) -> f32 {
    if max_distance <= 0.0 || distance >= max_distance {
        return 0.0;
    }
    (1.0 - distance.max(0.0) / max_distance).clamp(0.0, 1.0)
}

/// Visit every pair closer than `max_distance`, passing `(i, j, distance)`.
///
/// All pairs are compared on squared distance; the root is taken only for
/// pairs in range. With `cap`, the scan for particle `i` stops after that many
/// links. Returns the number of pairs visited.
pub fn for_each_link(
    positions: &[Point],
    max_distance: f32,
    cap: Option<usize>,
    mut visit: impl FnMut(usize, usize, f32),
) -> usize {
    if max_distance <= 0.0 || cap == Some(0) {
        return 0;
    }
    let max_sq = max_distance * max_distance;
    let mut total = 0;
    for (i, a) in positions.iter().enumerate() {
        let mut linked = 0;
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            let d2 = a.distance_squared(*b);
            if d2 >= max_sq {
                continue;
            }
            visit(i, j, d2.sqrt());
            total += 1;
            linked += 1;
            if cap.is_some_and(|k| linked >= k) {
                break;
            }
        }
    }
    total
}

/// Stroke links between `particles` at the positions given by `project`.
///
/// Returns the number of links drawn.
pub fn draw_links(
    surface: &mut dyn Surface,
    particles: &[Particle],
    project: impl Fn(&Particle) -> Point,
    max_distance: f32,
    cap: Option<usize>,
    style: &LinkStyle,
) -> usize {
    let positions: Vec<Point> = particles.iter().map(project).collect();
    let drawn = for_each_link(&positions, max_distance, cap, |i, j, dist| {
        let base = match style.color {
            LinkColor::Fixed(color) => color,
            LinkColor::FromParticle => particles[i].color,
        };
        let alpha = link_opacity(dist, max_distance) * style.max_alpha;
        surface.stroke_line(positions[i], positions[j], style.width, base.with_alpha(alpha));
    });
    trace!(drawn, max_distance, "links");
    drawn
}
