// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope Trie: a character trie with immutable hierarchy snapshots.
//!
//! This crate is the data half of Triescope. It provides:
//!
//! - [`Trie`]: an uncompressed prefix tree keyed by single `char`s, with
//!   insertion, exact-word lookup, and counting. There is no deletion.
//! - [`HierarchyNode`]: an immutable snapshot of the trie, produced by
//!   [`Trie::to_hierarchy`], in which every node's children are sorted by
//!   character. Snapshots are meant to be fed to a tree layout and thrown
//!   away; they carry no identity beyond their [`PrefixId`].
//! - [`PrefixId`]: the stable key of a snapshot node. The root has its own
//!   variant, so it can never collide with any prefix, including `""`.
//!
//! Characters are Rust `char`s (Unicode scalar values). Grapheme clusters
//! made of several scalars become several nodes.
//!
//! ## Example
//!
//! ```
//! use triescope_trie::{PrefixId, Trie};
//!
//! let mut trie = Trie::new();
//! assert!(trie.insert("cat"));
//! assert!(trie.insert("car"));
//! assert!(trie.insert("card"));
//! assert!(!trie.insert("car"));
//!
//! assert_eq!(trie.word_count(), 3);
//! assert_eq!(trie.node_count(), 6);
//!
//! let root = trie.to_hierarchy();
//! assert_eq!(root.id, PrefixId::Root);
//! let ca = root.find("ca").unwrap();
//! let kids: Vec<_> = ca.children.iter().filter_map(|c| c.ch).collect();
//! assert_eq!(kids, ['r', 't']);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod hierarchy;
mod trie;

pub use error::InsertError;
pub use hierarchy::{HierarchyNode, Iter, PrefixId};
pub use trie::Trie;
