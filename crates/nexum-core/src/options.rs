//! Per-mount configuration handed from a page to its backdrop.

use crate::{Rgba, Scene, DEFAULT_BREAKPOINT};

/// Default target frames per second for the animation loop.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Options supplied once when a renderer is mounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Tint for accent particles and glow spots.
    pub accent: Rgba,
    /// Replaces the renderer's full-tier particle count; constrained tiers
    /// never exceed their own budget.
    pub particle_count: Option<usize>,
    /// Replaces the renderer's full-tier link distance; constrained tiers
    /// never exceed their own budget.
    pub max_link_distance: Option<f32>,
    /// Viewport width below which the constrained tier applies.
    pub breakpoint: f32,
}

impl RenderOptions {
    /// Default options for a page.
    pub fn for_scene(scene: Scene) -> Self {
        Self {
            accent: scene.accent(),
            ..Self::default()
        }
    }

    pub fn with_accent(mut self, accent: Rgba) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = Some(count);
        self
    }

    pub fn with_max_link_distance(mut self, distance: f32) -> Self {
        self.max_link_distance = Some(distance);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            accent: Scene::Home.accent(),
            particle_count: None,
            max_link_distance: None,
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}
