// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options object accepted by the JavaScript constructor.

use core::fmt;
use core::time::Duration;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use triescope::{DiagramConfig, DiagramStats, PaletteOverrides};

/// Explicit CSS colors, one per palette role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOptions {
    /// Accent color.
    pub accent: Option<String>,
    /// Background color.
    pub background: Option<String>,
    /// Text color.
    pub text: Option<String>,
    /// Muted text color.
    pub muted_text: Option<String>,
    /// Border color.
    pub border: Option<String>,
}

/// `{ nodeSpacing, levelHeight, duration, maxHeight, nodeRadius, colors }`.
///
/// Every field is optional; `duration` is in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    /// Lateral distance between siblings.
    pub node_spacing: Option<f64>,
    /// Vertical distance between levels.
    pub level_height: Option<f64>,
    /// Transition length in milliseconds.
    pub duration: Option<f64>,
    /// Cap on the rendered height.
    pub max_height: Option<f64>,
    /// Radius of non-root nodes.
    pub node_radius: Option<f64>,
    /// Palette overrides.
    pub colors: ColorOptions,
}

/// An option that cannot be turned into a diagram setting.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsError {
    /// `duration` is negative, not a number, or too large.
    Duration(f64),
    /// A color override is not a CSS color.
    Color {
        /// The option name, for example `mutedText`.
        role: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration(ms) => write!(f, "invalid duration: {ms} ms"),
            Self::Color { role, value } => write!(f, "invalid color for `{role}`: {value:?}"),
        }
    }
}

impl core::error::Error for OptionsError {}

impl ViewOptions {
    /// Applies the given options on top of [`DiagramConfig::default`].
    pub fn to_config(&self) -> Result<DiagramConfig, OptionsError> {
        let mut config = DiagramConfig::default();
        if let Some(v) = self.node_spacing {
            config.node_spacing = v;
        }
        if let Some(v) = self.level_height {
            config.level_height = v;
        }
        if let Some(ms) = self.duration {
            config.duration =
                Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| OptionsError::Duration(ms))?;
        }
        if let Some(v) = self.max_height {
            config.max_height = v;
        }
        if let Some(v) = self.node_radius {
            config.node_radius = v;
        }

        let c = &self.colors;
        config.colors = PaletteOverrides {
            accent: color("accent", c.accent.as_deref())?,
            background: color("background", c.background.as_deref())?,
            text: color("text", c.text.as_deref())?,
            muted_text: color("mutedText", c.muted_text.as_deref())?,
            border: color("border", c.border.as_deref())?,
        };
        Ok(config)
    }
}

fn color(role: &'static str, value: Option<&str>) -> Result<Option<Color>, OptionsError> {
    let Some(value) = value else {
        return Ok(None);
    };
    parse_color(value.trim())
        .map(|c| Some(c.to_alpha_color::<Srgb>()))
        .map_err(|_| OptionsError::Color {
            role,
            value: value.to_owned(),
        })
}

/// `{ words, nodes }` as handed back to JavaScript.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatsObject {
    /// Number of distinct words.
    pub words: usize,
    /// Number of nodes, including the root.
    pub nodes: usize,
}

impl From<DiagramStats> for StatsObject {
    fn from(stats: DiagramStats) -> Self {
        Self {
            words: stats.words,
            nodes: stats.nodes,
        }
    }
}
