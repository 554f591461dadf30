// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paces a batch of words in real time and prints the final frame.
//!
//! The sleep handed to the diagram blocks the thread and reports the
//! elapsed wall-clock time, so `pollster` is enough to drive it.
//!
//! Usage:
//!   `RUST_LOG=triescope=debug cargo run -p triescope_demos --example animated_batch -- [delay ms]`

use std::env;
use std::error::Error;
use std::future;
use std::thread;
use std::time::{Duration, Instant};

use triescope::{DEFAULT_ANIMATION_DELAY, DiagramConfig, TrieDiagram};
use triescope_demos::init_tracing;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let delay = match env::args().nth(1) {
        Some(ms) => Duration::from_millis(ms.parse()?),
        None => DEFAULT_ANIMATION_DELAY,
    };

    let mut diagram = TrieDiagram::new(DiagramConfig::default().with_max_height(400.0));
    let start = Instant::now();
    let words = ["tea", "ten", "to", "inn", "in", "tea", "ted"];
    let accepted = pollster::block_on(diagram.add_words_animated(words, delay, |pause| {
        thread::sleep(pause);
        future::ready(start.elapsed())
    }));

    // Let the last word finish entering.
    let settle = diagram.now() + diagram.config().duration;
    diagram.tick(settle);

    tracing::info!(
        accepted,
        passes = diagram.render_passes(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "batch finished"
    );
    println!("{}", diagram.to_svg());
    Ok(())
}
