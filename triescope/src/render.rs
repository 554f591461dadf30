// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render pass: export, layout, surface, and the two keyed joins.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use triescope_layout::TidyTree;
use triescope_scene::{JoinHandler, KeyedDiff, KeyedLayer};
use triescope_timing::{Animated, Easing};
use triescope_trie::{PrefixId, Trie};

use crate::config::DiagramConfig;
use crate::element::{
    LINK_STROKE_WIDTH, LinkElement, NODE_STROKE_WIDTH, NodeElement, RING_OPACITY,
    ROOT_STROKE_WIDTH, Ring,
};
use crate::theme::Palette;

/// The visible region of the diagram in layout coordinates.
///
/// The view box is the layout extent padded by twice the node radius on
/// every side. Its height is capped, never scaled: content below the cap is
/// clipped.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Surface {
    view_box: Rect,
    height: f64,
}

impl Surface {
    /// Fits a surface around a layout extent.
    #[must_use]
    pub fn fit(extent: Rect, config: &DiagramConfig) -> Self {
        let view_box = extent.inflate(2.0 * config.node_radius, 2.0 * config.node_radius);
        Self {
            view_box,
            height: view_box.height().min(config.max_height),
        }
    }

    /// The full padded extent of the content.
    #[must_use]
    #[inline]
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Rendered width.
    #[must_use]
    #[inline]
    pub fn width(&self) -> f64 {
        self.view_box.width()
    }

    /// Rendered height, at most the configured cap.
    #[must_use]
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The part of the view box that is rendered.
    #[must_use]
    pub fn visible(&self) -> Rect {
        Rect::new(
            self.view_box.x0,
            self.view_box.y0,
            self.view_box.x1,
            self.view_box.y0 + self.height,
        )
    }

    /// Returns `true` if the content is taller than the rendered height.
    #[must_use]
    pub fn is_clipped(&self) -> bool {
        self.view_box.height() > self.height
    }
}

/// What one render pass changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Sequence number of the pass, starting at 1.
    pub pass: u64,
    /// Diagram time at which the pass ran.
    pub at: Duration,
    /// Node keys that entered, updated, and started exiting.
    pub nodes: KeyedDiff<PrefixId>,
    /// Link keys (target node ids) that entered, updated, and started exiting.
    pub links: KeyedDiff<PrefixId>,
    /// Surface computed by the pass.
    pub surface: Surface,
}

#[derive(Clone, Debug)]
pub(crate) struct NodeDatum {
    label: Option<Arc<str>>,
    is_root: bool,
    is_terminal: bool,
    position: Point,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct LinkDatum {
    source: Point,
    target: Point,
}

/// Target look of a node's main circle and label.
struct NodeStyle {
    radius: f64,
    fill: Color,
    stroke: Color,
    label: Color,
    stroke_width: f64,
}

/// Transition rules shared by the node and link joins.
struct Transitions<'a> {
    config: &'a DiagramConfig,
    palette: &'a Palette,
}

impl Transitions<'_> {
    fn style(&self, datum: &NodeDatum) -> NodeStyle {
        let p = self.palette;
        if datum.is_root {
            NodeStyle {
                radius: self.config.root_radius(),
                fill: p.muted_text,
                stroke: p.muted_text,
                label: p.muted_text,
                stroke_width: ROOT_STROKE_WIDTH,
            }
        } else if datum.is_terminal {
            NodeStyle {
                radius: self.config.node_radius,
                fill: p.accent,
                stroke: p.accent,
                label: p.label,
                stroke_width: NODE_STROKE_WIDTH,
            }
        } else {
            NodeStyle {
                radius: self.config.node_radius,
                fill: p.background,
                stroke: p.accent,
                label: p.text,
                stroke_width: NODE_STROKE_WIDTH,
            }
        }
    }

    /// A fresh opacity rising from zero to `target`.
    fn appear(&self, target: f64, now: Duration) -> Animated<f64> {
        let mut opacity = Animated::default();
        opacity.animate_from(0.0, target, now, self.config.duration, Easing::default());
        opacity
    }

    fn fade_in(&self, opacity: &mut Animated<f64>, target: f64, now: Duration) {
        if opacity.target() != target {
            opacity.animate_to(target, now, self.config.duration, Easing::default());
        }
    }

    fn fade_out(&self, opacity: &mut Animated<f64>, now: Duration) -> Duration {
        let exit = self.config.exit_duration();
        opacity.animate_to(0.0, now, exit, Easing::default());
        now.saturating_add(exit)
    }
}

impl JoinHandler<PrefixId, NodeDatum, NodeElement> for Transitions<'_> {
    fn enter(&mut self, _key: &PrefixId, datum: NodeDatum, now: Duration) -> NodeElement {
        let style = self.style(&datum);
        let opacity = self.appear(1.0, now);
        NodeElement {
            ring: datum.is_terminal.then(|| Ring {
                opacity: Animated::new(RING_OPACITY),
            }),
            label: datum.label,
            is_root: datum.is_root,
            is_terminal: datum.is_terminal,
            position: Animated::new(datum.position),
            opacity,
            radius: Animated::new(style.radius),
            fill: Animated::new(style.fill),
            stroke: Animated::new(style.stroke),
            label_color: Animated::new(style.label),
            stroke_width: style.stroke_width,
        }
    }

    fn update(&mut self, _key: &PrefixId, node: &mut NodeElement, datum: NodeDatum, now: Duration) {
        let style = self.style(&datum);
        let (duration, easing) = (self.config.duration, Easing::default());
        node.position.animate_to(datum.position, now, duration, easing);
        node.radius.animate_to(style.radius, now, duration, easing);
        node.fill.animate_to(style.fill, now, duration, easing);
        node.stroke.animate_to(style.stroke, now, duration, easing);
        node.label_color.animate_to(style.label, now, duration, easing);
        node.stroke_width = style.stroke_width;
        self.fade_in(&mut node.opacity, 1.0, now);

        match (datum.is_terminal, node.ring.is_some()) {
            (true, false) => {
                node.ring = Some(Ring {
                    opacity: self.appear(RING_OPACITY, now),
                });
            }
            (false, true) => node.ring = None,
            _ => {}
        }
        node.label = datum.label;
        node.is_root = datum.is_root;
        node.is_terminal = datum.is_terminal;
    }

    fn exit(&mut self, _key: &PrefixId, node: &mut NodeElement, now: Duration) -> Duration {
        self.fade_out(&mut node.opacity, now)
    }
}

impl JoinHandler<PrefixId, LinkDatum, LinkElement> for Transitions<'_> {
    fn enter(&mut self, _key: &PrefixId, datum: LinkDatum, now: Duration) -> LinkElement {
        LinkElement {
            source: Animated::new(datum.source),
            target: Animated::new(datum.target),
            opacity: self.appear(1.0, now),
            stroke_width: LINK_STROKE_WIDTH,
        }
    }

    fn update(&mut self, _key: &PrefixId, link: &mut LinkElement, datum: LinkDatum, now: Duration) {
        let (duration, easing) = (self.config.duration, Easing::default());
        link.source.animate_to(datum.source, now, duration, easing);
        link.target.animate_to(datum.target, now, duration, easing);
        link.stroke_width = LINK_STROKE_WIDTH;
        self.fade_in(&mut link.opacity, 1.0, now);
    }

    fn exit(&mut self, _key: &PrefixId, link: &mut LinkElement, now: Duration) -> Duration {
        self.fade_out(&mut link.opacity, now)
    }
}

/// Brings both layers in line with `trie` at time `now`.
pub(crate) fn render_pass(
    trie: &Trie,
    config: &DiagramConfig,
    palette: &Palette,
    links: &mut KeyedLayer<PrefixId, LinkElement>,
    nodes: &mut KeyedLayer<PrefixId, NodeElement>,
    now: Duration,
    pass: u64,
) -> RenderReport {
    let hierarchy = trie.to_hierarchy();
    let layout = TidyTree::new(Size::new(config.node_spacing, config.level_height))
        .layout(&hierarchy, |n| n.children.as_slice());
    let surface = Surface::fit(layout.extent(), config);

    let placed: Vec<_> = hierarchy.iter().zip(layout.iter()).collect();
    let link_data = placed.iter().filter_map(|(node, place)| {
        let parent = place.parent?;
        Some((
            node.id.clone(),
            LinkDatum {
                source: layout[parent].position,
                target: place.position,
            },
        ))
    });
    let node_data = placed.iter().map(|(node, place)| {
        (
            node.id.clone(),
            NodeDatum {
                label: node.ch.map(|c| Arc::from(String::from(c))),
                is_root: node.is_root(),
                is_terminal: node.is_terminal,
                position: place.position,
            },
        )
    });

    let mut transitions = Transitions { config, palette };
    let links_diff = links.join(link_data, now, &mut transitions);
    let nodes_diff = nodes.join(node_data, now, &mut transitions);

    tracing::debug!(
        pass,
        nodes.enter = nodes_diff.enter.len(),
        nodes.update = nodes_diff.update.len(),
        nodes.exit = nodes_diff.exit.len(),
        links.enter = links_diff.enter.len(),
        links.update = links_diff.update.len(),
        links.exit = links_diff.exit.len(),
        height = surface.height(),
        "render pass"
    );

    RenderReport {
        pass,
        at: now,
        nodes: nodes_diff,
        links: links_diff,
        surface,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_pads_by_twice_the_radius_and_caps_height() {
        let config = DiagramConfig::default()
            .with_node_radius(10.0)
            .with_max_height(100.0);
        let surface = Surface::fit(Rect::new(-50.0, 0.0, 50.0, 160.0), &config);
        assert_eq!(surface.view_box(), Rect::new(-70.0, -20.0, 70.0, 180.0));
        assert_eq!(surface.width(), 140.0);
        assert_eq!(surface.height(), 100.0);
        assert!(surface.is_clipped());
        assert_eq!(surface.visible(), Rect::new(-70.0, -20.0, 70.0, 80.0));
    }

    #[test]
    fn short_content_is_not_clipped() {
        let surface = Surface::fit(Rect::ZERO, &DiagramConfig::default());
        assert_eq!(surface.height(), 72.0);
        assert!(!surface.is_clipped());
    }

    #[test]
    fn root_style_is_muted_and_narrow() {
        let config = DiagramConfig::default();
        let palette = Palette::default();
        let t = Transitions {
            config: &config,
            palette: &palette,
        };
        let root = t.style(&NodeDatum {
            label: None,
            is_root: true,
            is_terminal: false,
            position: Point::ZERO,
        });
        assert_eq!(root.fill, palette.muted_text);
        assert_eq!(root.stroke, palette.muted_text);
        assert_eq!(root.stroke_width, ROOT_STROKE_WIDTH);
        assert_eq!(root.radius, 9.0);
    }
}
