// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Art styles offered by the sketch finisher

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Style used when the upload omits one
pub const DEFAULT_STYLE: &str = "comic";

/// Visual style requested for a sketch.
///
/// Unknown strings are kept verbatim in `Other` and used as the label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtStyle {
    Abstract,
    Oil,
    Watercolor,
    #[default]
    Comic,
    Princess,
    Robot,
    Other(String),
}

impl ArtStyle {
    /// Parse a raw style key. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "abstract" => Self::Abstract,
            "oil" => Self::Oil,
            "watercolor" => Self::Watercolor,
            "comic" => Self::Comic,
            "princess" => Self::Princess,
            "robot" => Self::Robot,
            other => Self::Other(other.to_string()),
        }
    }

    /// Request key for this style
    pub fn key(&self) -> &str {
        match self {
            Self::Abstract => "abstract",
            Self::Oil => "oil",
            Self::Watercolor => "watercolor",
            Self::Comic => "comic",
            Self::Princess => "princess",
            Self::Robot => "robot",
            Self::Other(raw) => raw,
        }
    }

    /// Localized label embedded in prompt text
    pub fn label(&self) -> &str {
        match self {
            Self::Abstract => "추상화",
            Self::Oil => "유화",
            Self::Watercolor => "수채화",
            Self::Comic => "만화풍",
            Self::Princess => "공주님",
            Self::Robot => "로보트",
            Self::Other(raw) => raw,
        }
    }
}

impl FromStr for ArtStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
