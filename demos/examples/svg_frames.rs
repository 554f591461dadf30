// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes the frames of a short trie session as SVG files.
//!
//! The session inserts a batch, adds a few single words, highlights a
//! prefix, and finally clears the trie, with a simulated 60 Hz clock.
//!
//! Usage:
//!   `cargo run -p triescope_demos --example svg_frames -- [output dir]`

use std::env;
use std::error::Error;
use std::time::Duration;

use triescope::{DiagramConfig, TrieDiagram};
use triescope_demos::{FrameWriter, init_tracing};

const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let dir = env::args()
        .nth(1)
        .unwrap_or_else(|| "target/triescope_frames".to_owned());
    let mut frames = FrameWriter::new(dir)?;

    let mut diagram = TrieDiagram::new(DiagramConfig::default());
    diagram.add_words(["the", "there", "their"]);
    frames.write_until_settled(&mut diagram, FRAME)?;

    for word in ["car", "cart", "card", "care"] {
        diagram.add_word(word);
        frames.write_until_settled(&mut diagram, FRAME)?;
    }

    diagram.highlight_path("cart");
    frames.write(&diagram)?;

    diagram.clear();
    frames.write_until_settled(&mut diagram, FRAME)?;

    let stats = diagram.stats();
    tracing::info!(
        frames = frames.frames(),
        dir = %frames.dir().display(),
        words = stats.words,
        nodes = stats.nodes,
        "done"
    );
    Ok(())
}
