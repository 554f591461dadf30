// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser binding for Triescope diagrams.
//!
//! On `wasm32`, this crate exports a `TrieView` class to JavaScript:
//!
//! ```js
//! import init, { TrieView } from "./triescope_web.js";
//!
//! await init();
//! const view = new TrieView(document.getElementById("trie"), {
//!   nodeRadius: 16,
//!   colors: { accent: "rebeccapurple" },
//! });
//! view.addWords(["the", "there", "their"]);
//! await view.addWordsAnimated(["car", "cart"], 300);
//! view.highlightPath("car");
//! console.log(view.stats()); // { words: 5, nodes: ... }
//! ```
//!
//! The view resolves its palette once, from the `colors` option and then
//! the container's `--accent`, `--background`, `--text`, `--text-muted`,
//! and `--border` custom properties. Frames are drawn by replacing the
//! container's content with an SVG snapshot on every animation frame while
//! transitions are running.
//!
//! The options object is parsed by [`ViewOptions`], which is available on
//! every target.

mod options;
#[cfg(target_arch = "wasm32")]
mod view;

pub use options::{ColorOptions, OptionsError, StatsObject, ViewOptions};
#[cfg(target_arch = "wasm32")]
pub use view::TrieView;

/// Installs the panic hook and the `tracing` subscriber for the console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}
