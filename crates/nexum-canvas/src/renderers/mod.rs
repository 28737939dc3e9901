//! The background renderers a page can mount.

mod constellation;
mod neural;
mod roadmap;

use std::fmt;

use nexum_core::{BackgroundStyle, Point, RenderOptions, Size};

use crate::budget::{Budgets, RenderConfig};
use crate::manager::Listener;
use crate::particle::{GlowSpot, Particle};
use crate::surface::Surface;

pub use constellation::Constellation;
pub use neural::NeuralCanvas;
pub use roadmap::Roadmap;

/// Per-frame inputs handed to [`Renderer::draw`].
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub config: &'a RenderConfig,
    /// Logical surface size.
    pub size: Size,
    /// Last known pointer, [`Point::OFF_SURFACE`] when unknown.
    pub pointer: Point,
    /// Vertical scroll offset in logical pixels.
    pub scroll: f32,
    /// Animation clock, advanced by a fixed step per frame.
    pub time: f32,
}

/// One animated background.
///
/// A renderer owns its populations; the manager owns the surface, the clock
/// and the environment state.
pub trait Renderer: fmt::Debug {
    fn style(&self) -> BackgroundStyle;

    /// Budgets for each device tier.
    fn budgets(&self) -> Budgets;

    /// Environment events the renderer reacts to.
    fn listeners(&self) -> &'static [Listener];

    /// Discard every particle and glow spot and create fresh ones for `size`.
    fn seed(&mut self, config: &RenderConfig, size: Size);

    /// Advance the simulation one frame and paint it.
    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameContext<'_>);

    fn particles(&self) -> &[Particle];

    fn glow_spots(&self) -> &[GlowSpot];
}

/// Build the renderer for a background style.
pub fn renderer_for(
    style: BackgroundStyle,
    options: RenderOptions,
    seed: u64,
) -> Box<dyn Renderer> {
    match style {
        BackgroundStyle::Neural => Box::new(NeuralCanvas::new(options, seed)),
        BackgroundStyle::Constellation => Box::new(Constellation::new(options, seed)),
        BackgroundStyle::Roadmap => Box::new(Roadmap::new(options, seed)),
    }
}
