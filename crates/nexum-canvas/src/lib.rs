//! Procedural canvas backdrops for nexum pages.
//!
//! This crate holds the animation core: a gradient noise field, the particle
//! simulator, proximity links, the glow/vignette/grain compositor, and the
//! [`SurfaceManager`] that sizes a drawing surface and drives one of the
//! three renderers frame by frame. [`Pixmap`] is the software surface and
//! [`CanvasView`] presents it on a terminal.

mod budget;
mod compositor;
mod field;
mod gradient;
mod links;
mod manager;
mod noise;
mod particle;
mod pixmap;
mod renderers;
mod scheduler;
mod surface;
mod widget;

#[cfg(test)]
mod test_support;

pub use budget::{Budgets, RenderConfig, TierBudget, CONSTRAINED_DPR_CAP, FULL_DPR_CAP};
pub use compositor::{draw_scanlines, draw_vignette, Compositor, Layers};
pub use field::{wrap, Motion, ParticleField, PointerForce};
pub use gradient::{ColorStop, RadialGradient};
pub use links::{draw_links, for_each_link, link_opacity, LinkColor, LinkStyle};
pub use manager::{Listener, SurfaceManager, SurfaceState, TIME_STEP};
pub use noise::NoiseGenerator;
pub use particle::{GlowSpot, Particle, ParticleKind};
pub use pixmap::Pixmap;
pub use renderers::{renderer_for, Constellation, FrameContext, NeuralCanvas, Renderer, Roadmap};
pub use scheduler::{FrameClock, FrameHandle, FrameScheduler};
pub use surface::{Rect, Surface, SurfaceError};
pub use widget::{CanvasView, CELL_HEIGHT, CELL_WIDTH, TERMINAL_PIXEL_RATIO};
