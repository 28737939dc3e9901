//! Page scenes: the marketing pages that mount a backdrop.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BackgroundStyle, ParseStyleError, Rgba};

/// A page of the site, carrying its copy and the backdrop it mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    #[default]
    Home,
    Core,
    Creator,
    Capital,
    Arena,
    Waitlist,
    Roadmap,
    Phases,
}

impl Scene {
    pub const ALL: [Scene; 8] = [
        Scene::Home,
        Scene::Core,
        Scene::Creator,
        Scene::Capital,
        Scene::Arena,
        Scene::Waitlist,
        Scene::Roadmap,
        Scene::Phases,
    ];

    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        let idx = Scene::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Scene::ALL[(idx + 1) % Scene::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Home => "home",
            Scene::Core => "core",
            Scene::Creator => "creator",
            Scene::Capital => "capital",
            Scene::Arena => "arena",
            Scene::Waitlist => "waitlist",
            Scene::Roadmap => "roadmap",
            Scene::Phases => "phases",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scene::Home => "INTELLIGENCE INFRASTRUCTURE FOR CREATORS",
            Scene::Core => "Core — Central Intelligence",
            Scene::Creator => "Creator District — Tools That Amplify Vision",
            Scene::Capital => "Capital Lab — Fuel Your Growth",
            Scene::Arena => "The Arena — Where Creators Compete",
            Scene::Waitlist => "JOIN THE WAITLIST",
            Scene::Roadmap | Scene::Phases => "The Path Forward",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Scene::Home => {
                "The foundational AI platform that empowers creators to build, scale, and monetize."
            }
            Scene::Core => "Your personal AI command center. Monitor, command, and evolve.",
            Scene::Creator => {
                "AI-powered systems to build, structure, and scale your creative output."
            }
            Scene::Capital => "Turn creative output into scalable, optimized revenue systems.",
            Scene::Arena => "Compete, rank, and earn within a performance-driven creator network.",
            Scene::Waitlist => "Submit your data to enter the algorithmic era",
            Scene::Roadmap => {
                "Watch as NEXUM evolves from foundational infrastructure to the autonomous operating system of the AI era"
            }
            Scene::Phases => "Watch as we build the future of AI-powered creation",
        }
    }

    /// Accent color the page hands to its backdrop.
    pub fn accent(self) -> Rgba {
        match self {
            Scene::Home | Scene::Waitlist | Scene::Phases => Rgba::rgb(0x00, 0xe5, 0xff),
            Scene::Core => Rgba::rgb(0x00, 0xbf, 0xff),
            Scene::Creator => Rgba::rgb(0xa8, 0x55, 0xf7),
            Scene::Capital => Rgba::rgb(0x10, 0xb9, 0x81),
            Scene::Arena => Rgba::rgb(0xf5, 0x9e, 0x0b),
            Scene::Roadmap => Rgba::rgb(0x06, 0xb6, 0xd4),
        }
    }

    /// Backdrop the page mounts.
    pub fn background(self) -> BackgroundStyle {
        match self {
            Scene::Roadmap => BackgroundStyle::Constellation,
            Scene::Phases => BackgroundStyle::Roadmap,
            _ => BackgroundStyle::Neural,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scene {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Scene::ALL
            .into_iter()
            .find(|scene| scene.name() == wanted)
            .ok_or_else(|| ParseStyleError {
                kind: "scene",
                value: s.to_string(),
            })
    }
}
