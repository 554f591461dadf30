// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope Layout: tidy tree layout for rooted trees.
//!
//! [`TidyTree`] assigns every node of a rooted, ordered tree a lateral and a
//! depth coordinate using the linear-time Reingold–Tilford variant by
//! Buchheim, Jünger and Leipert (as corrected by Walker). It is the layout
//! most tree-drawing toolkits call a "tidy tree":
//!
//! - nodes on the same level never overlap; siblings are one node width
//!   apart and cousins two node widths apart;
//! - a parent is centered over its first and last child;
//! - identical subtrees are laid out identically, and the drawing of a
//!   tree is the mirror image of the drawing of its mirrored tree.
//!
//! Coordinates use fixed node sizes: `x` is measured in multiples of
//! [`TidyTree::node_size`]`.width` and `y` is `depth * node_size.height`.
//! The root is placed at the origin; `x` grows to the right and `y` grows
//! downwards.
//!
//! The input tree is borrowed through a `children` accessor, so any owned
//! tree type can be laid out without implementing a trait:
//!
//! ```
//! use kurbo::{Point, Size};
//! use triescope_layout::TidyTree;
//!
//! struct Node(Vec<Node>);
//!
//! let tree = Node(vec![Node(vec![]), Node(vec![])]);
//! let layout = TidyTree::new(Size::new(40.0, 60.0)).layout(&tree, |n| n.0.as_slice());
//!
//! assert_eq!(layout.len(), 3);
//! assert_eq!(layout[0].position, Point::ZERO);
//! assert_eq!(layout[1].position, Point::new(-20.0, 60.0));
//! assert_eq!(layout[2].position, Point::new(20.0, 60.0));
//! ```
//!
//! Placements are returned in pre-order (children visited in the order the
//! accessor yields them), so they can be zipped with a pre-order walk of the
//! input tree.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tidy;

pub use tidy::{PlacedNode, TidyTree, TreeLayout};
