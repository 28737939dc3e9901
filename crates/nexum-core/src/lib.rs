//! Core types shared by the nexum crates.
//!
//! Colors, viewport geometry, device tiers, background styles and the page
//! scenes that mount them. Nothing in here draws; see `nexum-canvas`.

mod color;
mod options;
mod scene;
mod style;
mod viewport;

pub use color::{ParseColorError, Rgba};
pub use options::{RenderOptions, DEFAULT_FRAME_RATE};
pub use scene::Scene;
pub use style::{BackgroundStyle, ParseStyleError};
pub use viewport::{DeviceTier, Point, Size, Viewport, DEFAULT_BREAKPOINT};
