//! Background style selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a background or scene name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseStyleError {
    pub kind: &'static str,
    pub value: String,
}

/// Which animated backdrop is mounted behind a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundStyle {
    /// Noise-drifting particles under accent glow spots with a motion trail.
    #[default]
    #[serde(alias = "neural-canvas")]
    Neural,
    /// Dense node field joined by proximity lines, pulled gently by the pointer.
    Constellation,
    /// Depth-scaled particles and pulsing phase-colored blobs under a vignette.
    Roadmap,
}

impl BackgroundStyle {
    pub const ALL: [BackgroundStyle; 3] = [
        BackgroundStyle::Neural,
        BackgroundStyle::Constellation,
        BackgroundStyle::Roadmap,
    ];

    /// Cycle to the next style.
    pub fn next(self) -> Self {
        match self {
            BackgroundStyle::Neural => BackgroundStyle::Constellation,
            BackgroundStyle::Constellation => BackgroundStyle::Roadmap,
            BackgroundStyle::Roadmap => BackgroundStyle::Neural,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackgroundStyle::Neural => "neural",
            BackgroundStyle::Constellation => "constellation",
            BackgroundStyle::Roadmap => "roadmap",
        }
    }
}

impl fmt::Display for BackgroundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackgroundStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neural" | "neural-canvas" => Ok(BackgroundStyle::Neural),
            "constellation" => Ok(BackgroundStyle::Constellation),
            "roadmap" => Ok(BackgroundStyle::Roadmap),
            _ => Err(ParseStyleError {
                kind: "background",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all() {
        let mut style = BackgroundStyle::default();
        for _ in 0..BackgroundStyle::ALL.len() {
            style = style.next();
        }
        assert_eq!(style, BackgroundStyle::default());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Constellation".parse::<BackgroundStyle>(),
            Ok(BackgroundStyle::Constellation)
        );
        assert_eq!(
            "neural-canvas".parse::<BackgroundStyle>(),
            Ok(BackgroundStyle::Neural)
        );
        assert!("plasma".parse::<BackgroundStyle>().is_err());
    }
}
