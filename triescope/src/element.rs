// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene elements.
//!
//! Every visual property that changes between render passes is an
//! [`Animated`] value, read at the diagram's current time.

use alloc::sync::Arc;
use core::time::Duration;

use kurbo::{BezPath, Point};
use peniko::Color;
use triescope_timing::Animated;

/// Stroke width of the root node.
pub const ROOT_STROKE_WIDTH: f64 = 1.0;
/// Stroke width of every other node.
pub const NODE_STROKE_WIDTH: f64 = 2.0;
/// Stroke width of links.
pub const LINK_STROKE_WIDTH: f64 = 2.0;
/// Stroke width of highlighted nodes and links.
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 4.0;
/// Distance between a terminal node's circle and its ring.
pub const RING_OFFSET: f64 = 5.0;
/// Resting opacity of a terminal node's ring.
pub const RING_OPACITY: f64 = 0.4;
/// Font size of node labels.
pub const LABEL_FONT_SIZE: f64 = 14.0;

/// The edge from a node's parent to the node.
#[derive(Clone, Debug)]
pub struct LinkElement {
    pub(crate) source: Animated<Point>,
    pub(crate) target: Animated<Point>,
    pub(crate) opacity: Animated<f64>,
    pub(crate) stroke_width: f64,
}

impl LinkElement {
    /// Parent end of the link at `now`.
    #[must_use]
    pub fn source(&self, now: Duration) -> Point {
        self.source.value(now)
    }

    /// Child end of the link at `now`.
    #[must_use]
    pub fn target(&self, now: Duration) -> Point {
        self.target.value(now)
    }

    /// Opacity at `now`.
    #[must_use]
    pub fn opacity(&self, now: Duration) -> f64 {
        self.opacity.value(now)
    }

    /// Current stroke width.
    #[must_use]
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Returns `true` while the link is highlighted.
    #[must_use]
    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.stroke_width == HIGHLIGHT_STROKE_WIDTH
    }

    /// The vertical link curve at `now`.
    #[must_use]
    pub fn path(&self, now: Duration) -> BezPath {
        vertical_link(self.source(now), self.target(now))
    }

    pub(crate) fn is_settled(&self, now: Duration) -> bool {
        self.source.is_settled(now) && self.target.is_settled(now) && self.opacity.is_settled(now)
    }
}

/// A cubic curve leaving `source` and entering `target` vertically.
///
/// Both control points sit at the mid depth, above the respective endpoints.
#[must_use]
pub fn vertical_link(source: Point, target: Point) -> BezPath {
    let mid = (source.y + target.y) / 2.0;
    let mut path = BezPath::new();
    path.move_to(source);
    path.curve_to(Point::new(source.x, mid), Point::new(target.x, mid), target);
    path
}

/// The outer ring drawn beneath a terminal node.
#[derive(Clone, Debug)]
pub struct Ring {
    pub(crate) opacity: Animated<f64>,
}

impl Ring {
    /// Opacity at `now`.
    #[must_use]
    pub fn opacity(&self, now: Duration) -> f64 {
        self.opacity.value(now)
    }
}

/// A node group: main circle, label, and an optional ring.
#[derive(Clone, Debug)]
pub struct NodeElement {
    pub(crate) label: Option<Arc<str>>,
    pub(crate) is_root: bool,
    pub(crate) is_terminal: bool,
    pub(crate) position: Animated<Point>,
    pub(crate) opacity: Animated<f64>,
    pub(crate) radius: Animated<f64>,
    pub(crate) fill: Animated<Color>,
    pub(crate) stroke: Animated<Color>,
    pub(crate) label_color: Animated<Color>,
    pub(crate) stroke_width: f64,
    pub(crate) ring: Option<Ring>,
}

impl NodeElement {
    /// The node's character, `None` for the root.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` if a word ended here at the last render pass.
    #[must_use]
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Center at `now`.
    #[must_use]
    pub fn position(&self, now: Duration) -> Point {
        self.position.value(now)
    }

    /// Center this node is moving to.
    #[must_use]
    pub fn target_position(&self) -> Point {
        self.position.target()
    }

    /// Group opacity at `now`.
    #[must_use]
    pub fn opacity(&self, now: Duration) -> f64 {
        self.opacity.value(now)
    }

    /// Main circle radius at `now`.
    #[must_use]
    pub fn radius(&self, now: Duration) -> f64 {
        self.radius.value(now)
    }

    /// Main circle fill at `now`.
    #[must_use]
    pub fn fill(&self, now: Duration) -> Color {
        self.fill.value(now)
    }

    /// Main circle outline at `now`.
    #[must_use]
    pub fn stroke(&self, now: Duration) -> Color {
        self.stroke.value(now)
    }

    /// Label color at `now`.
    #[must_use]
    pub fn label_color(&self, now: Duration) -> Color {
        self.label_color.value(now)
    }

    /// Fill, outline and label colors this node is moving to.
    #[must_use]
    pub fn target_colors(&self) -> (Color, Color, Color) {
        (
            self.fill.target(),
            self.stroke.target(),
            self.label_color.target(),
        )
    }

    /// Current stroke width of the main circle.
    #[must_use]
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Returns `true` while the node is highlighted.
    #[must_use]
    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.stroke_width == HIGHLIGHT_STROKE_WIDTH
    }

    /// The outer ring, present on terminal nodes.
    #[must_use]
    pub fn ring(&self) -> Option<&Ring> {
        self.ring.as_ref()
    }

    /// Stroke width this node has when not highlighted.
    pub(crate) fn rule_stroke_width(&self) -> f64 {
        if self.is_root {
            ROOT_STROKE_WIDTH
        } else {
            NODE_STROKE_WIDTH
        }
    }

    pub(crate) fn is_settled(&self, now: Duration) -> bool {
        self.position.is_settled(now)
            && self.opacity.is_settled(now)
            && self.radius.is_settled(now)
            && self.fill.is_settled(now)
            && self.stroke.is_settled(now)
            && self.label_color.is_settled(now)
            && self.ring.as_ref().is_none_or(|r| r.opacity.is_settled(now))
    }
}
