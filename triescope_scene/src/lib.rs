// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triescope Scene: keyed reconciliation over retained layers.
//!
//! A retained scene keeps its elements between frames and, on every new
//! data set, works out which elements to create, which to update in place,
//! and which to retire. This crate provides that bookkeeping without
//! assuming anything about what an element looks like:
//!
//! - [`diff_keys`]: a plain three-way comparison of two key sequences into
//!   a [`KeyedDiff`] (`enter`, `update`, `exit`).
//! - [`KeyedLayer`]: an ordered collection of elements keyed by `K`. Its
//!   [`KeyedLayer::join`] applies a new data set through a
//!   [`JoinHandler`], which decides how elements are built, changed, and
//!   faded out. Exiting elements stay in the layer (and keep painting)
//!   until their exit animation ends and [`KeyedLayer::prune`] runs.
//!
//! Elements keep the order in which they entered, which is the paint order.
//! An element that is still exiting when its key shows up again is revived
//! and goes through `update`, never duplicated.
//!
//! ```
//! use core::time::Duration;
//! use triescope_scene::{JoinHandler, KeyedLayer};
//!
//! struct Fade;
//!
//! impl JoinHandler<&'static str, u32, u32> for Fade {
//!     fn enter(&mut self, _key: &&'static str, datum: u32, _now: Duration) -> u32 {
//!         datum
//!     }
//!     fn update(&mut self, _key: &&'static str, element: &mut u32, datum: u32, _now: Duration) {
//!         *element = datum;
//!     }
//!     fn exit(&mut self, _key: &&'static str, _element: &mut u32, now: Duration) -> Duration {
//!         now + Duration::from_millis(100)
//!     }
//! }
//!
//! let mut layer = KeyedLayer::new();
//! let t0 = Duration::ZERO;
//! layer.join([("a", 1), ("b", 2)], t0, &mut Fade);
//! let diff = layer.join([("b", 3)], t0, &mut Fade);
//! assert_eq!(diff.update, ["b"]);
//! assert_eq!(diff.exit, ["a"]);
//!
//! // "a" is still painted while it fades out.
//! assert_eq!(layer.len(), 2);
//! layer.prune(Duration::from_millis(100));
//! assert_eq!(layer.len(), 1);
//! assert_eq!(layer.get(&"b"), Some(&3));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diff;
mod layer;

pub use diff::{KeyedDiff, diff_keys};
pub use layer::{JoinHandler, KeyedLayer};
