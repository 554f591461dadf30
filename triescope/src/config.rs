// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagram options.

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use peniko::Color;

/// Explicit palette colors, taking precedence over any theme.
///
/// Every role left as `None` falls back to the theme, then to the built-in
/// default. See [`Palette::resolve`](crate::Palette::resolve).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PaletteOverrides {
    /// Terminal nodes and node outlines.
    pub accent: Option<Color>,
    /// Fill of internal nodes.
    pub background: Option<Color>,
    /// Labels of internal nodes.
    pub text: Option<Color>,
    /// The root node.
    pub muted_text: Option<Color>,
    /// Links.
    pub border: Option<Color>,
}

/// Options for a [`TrieDiagram`](crate::TrieDiagram).
///
/// Values are taken as given; a zero or negative spacing or radius produces
/// a degenerate drawing rather than an error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiagramConfig {
    /// Lateral distance between adjacent siblings.
    pub node_spacing: f64,
    /// Vertical distance between adjacent levels.
    pub level_height: f64,
    /// Length of enter and update transitions. Exits take half as long.
    pub duration: Duration,
    /// Cap on the rendered surface height. Taller content is clipped.
    pub max_height: f64,
    /// Radius of every non-root node.
    pub node_radius: f64,
    /// Explicit palette colors.
    pub colors: PaletteOverrides,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            node_spacing: 50.0,
            level_height: 80.0,
            duration: Duration::from_millis(400),
            max_height: 600.0,
            node_radius: 18.0,
            colors: PaletteOverrides::default(),
        }
    }
}

impl DiagramConfig {
    /// Sets [`DiagramConfig::node_spacing`].
    #[must_use]
    pub fn with_node_spacing(mut self, node_spacing: f64) -> Self {
        self.node_spacing = node_spacing;
        self
    }

    /// Sets [`DiagramConfig::level_height`].
    #[must_use]
    pub fn with_level_height(mut self, level_height: f64) -> Self {
        self.level_height = level_height;
        self
    }

    /// Sets [`DiagramConfig::duration`].
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets [`DiagramConfig::max_height`].
    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = max_height;
        self
    }

    /// Sets [`DiagramConfig::node_radius`].
    #[must_use]
    pub fn with_node_radius(mut self, node_radius: f64) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Sets [`DiagramConfig::colors`].
    #[must_use]
    pub fn with_colors(mut self, colors: PaletteOverrides) -> Self {
        self.colors = colors;
        self
    }

    /// Radius of the root node: half the node radius, rounded.
    #[must_use]
    pub fn root_radius(&self) -> f64 {
        (self.node_radius / 2.0).round()
    }

    /// Length of exit transitions.
    #[must_use]
    #[inline]
    pub fn exit_duration(&self) -> Duration {
        self.duration / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_radius_rounds_half_the_node_radius() {
        assert_eq!(DiagramConfig::default().root_radius(), 9.0);
        let odd = DiagramConfig::default().with_node_radius(15.0);
        assert_eq!(odd.root_radius(), 8.0);
    }

    #[test]
    fn builders_replace_single_fields() {
        let config = DiagramConfig::default()
            .with_node_spacing(30.0)
            .with_duration(Duration::from_millis(250));
        assert_eq!(config.node_spacing, 30.0);
        assert_eq!(config.exit_duration(), Duration::from_millis(125));
        assert_eq!(config.level_height, DiagramConfig::default().level_height);
    }
}
