// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope: a trie drawn as an animated tree diagram.
//!
//! [`TrieDiagram`] owns a [`Trie`] and a retained scene that mirrors it.
//! Inserting words, clearing, and highlighting a prefix path all go through
//! the diagram, which keeps the scene in step by *reconciling* rather than
//! rebuilding:
//!
//! 1. the trie is exported to a fresh [`HierarchyNode`] snapshot;
//! 2. a [tidy tree](triescope_layout::TidyTree) assigns every node a
//!    position, `node_spacing` apart laterally and `level_height` apart in
//!    depth;
//! 3. the [`Surface`] is fitted around the layout, padded by twice the node
//!    radius, with its height capped at `max_height`;
//! 4. links (keyed by the id of the node they lead to) and then nodes
//!    (keyed by [`PrefixId`]) are joined against the retained layers. New
//!    elements fade in over `duration`, surviving ones move and recolor
//!    over `duration`, and vanished ones fade out over half of it before
//!    being removed.
//!
//! ## Time
//!
//! The diagram never reads a clock. Transitions are interpolations over a
//! [`Duration`](core::time::Duration) timeline that only advances when the
//! host calls [`TrieDiagram::tick`]; a browser host ticks from
//! `requestAnimationFrame`, a test ticks by hand. Likewise
//! [`TrieDiagram::add_words_animated`] takes the sleep function from the
//! host, so it runs under any executor.
//!
//! ## Colors
//!
//! Nodes follow a fixed rule: the root is small and muted with a narrow
//! outline, terminal nodes are filled with the accent color and carry a
//! faint outer ring, and internal nodes are filled with the background
//! color and outlined in the accent color. The [`Palette`] is resolved once,
//! at construction, from explicit [`PaletteOverrides`], then a
//! [`ThemeSource`] (the `--accent`, `--background`, `--text`,
//! `--text-muted`, and `--border` custom properties), then defaults.
//!
//! ## Output
//!
//! [`TrieDiagram::paint`] emits the current frame as
//! [imaging ops](triescope_imaging), and [`TrieDiagram::to_svg`] renders
//! it to a standalone SVG document.
//!
//! ```
//! use core::time::Duration;
//! use triescope::{DiagramConfig, PrefixId, TrieDiagram};
//!
//! let mut diagram = TrieDiagram::new(DiagramConfig::default());
//! diagram.add_words(["cat", "car", "card"]);
//! assert_eq!(diagram.render_passes(), 1);
//! assert_eq!(diagram.stats().nodes, 6);
//!
//! diagram.highlight_path("car");
//! assert!(diagram.node(&PrefixId::from("ca")).unwrap().is_highlighted());
//!
//! // Let the enter transitions finish.
//! diagram.tick(Duration::from_secs(1));
//! assert!(!diagram.is_animating());
//! assert!(diagram.to_svg().starts_with("<svg"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Render passes are reported
//! through [`tracing`] at `debug` level.

#![no_std]

extern crate alloc;

mod config;
mod diagram;
mod element;
mod paint;
mod render;
mod theme;

pub use config::{DiagramConfig, PaletteOverrides};
pub use diagram::{BatchStep, DEFAULT_ANIMATION_DELAY, DiagramStats, TrieDiagram, WordBatch};
pub use element::{
    HIGHLIGHT_STROKE_WIDTH, LABEL_FONT_SIZE, LINK_STROKE_WIDTH, LinkElement, NODE_STROKE_WIDTH,
    NodeElement, RING_OFFSET, RING_OPACITY, ROOT_STROKE_WIDTH, Ring, vertical_link,
};
pub use paint::FrameResources;
pub use render::{RenderReport, Surface};
pub use theme::{NoTheme, Palette, ThemeSource, ThemeVariable};

pub use triescope_trie::{HierarchyNode, PrefixId, Trie};
