//! Command line flags.

use std::path::PathBuf;

use clap::Parser;
use nexum_config::Config;
use nexum_core::{BackgroundStyle, Scene};

/// Animated nexum backdrops in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Page to open (home, core, creator, capital, arena, waitlist, roadmap, phases).
    #[arg(long)]
    pub scene: Option<Scene>,

    /// Backdrop to mount instead of the scene's own (neural, constellation, roadmap).
    #[arg(long)]
    pub background: Option<BackgroundStyle>,

    /// Accent color as a hex string, e.g. `#00e5ff`.
    #[arg(long)]
    pub accent: Option<String>,

    /// Particle count on wide terminals.
    #[arg(long)]
    pub particles: Option<usize>,

    /// Maximum link distance in logical pixels.
    #[arg(long)]
    pub link_distance: Option<f32>,

    /// Read settings from this file instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overlay flags on top of file settings.
    pub fn apply(&self, config: &mut Config) {
        if let Some(scene) = self.scene {
            config.scene = scene;
        }
        if let Some(background) = self.background {
            config.background = Some(background);
        }
        if let Some(accent) = &self.accent {
            config.accent = Some(accent.clone());
        }
        if let Some(count) = self.particles {
            config.particle_count = Some(count);
        }
        if let Some(distance) = self.link_distance {
            config.max_link_distance = Some(distance);
        }
    }
}
