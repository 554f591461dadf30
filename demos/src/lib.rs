// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Triescope demos.
//!
//! The demos are headless: they drive a diagram with a simulated or real
//! clock and write SVG frames to disk.
//!
//! Run them with, for example:
//!   `cargo run -p triescope_demos --example svg_frames -- target/frames`
//!   `RUST_LOG=triescope=debug cargo run -p triescope_demos --example animated_batch`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use triescope::TrieDiagram;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// Writes numbered SVG frames of a diagram into a directory.
#[derive(Debug)]
pub struct FrameWriter {
    dir: PathBuf,
    next: usize,
}

impl FrameWriter {
    /// Creates `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, next: 0 })
    }

    /// Writes the diagram's current frame, returning its path.
    pub fn write(&mut self, diagram: &TrieDiagram) -> io::Result<PathBuf> {
        let path = self.dir.join(format!("frame_{:04}.svg", self.next));
        fs::write(&path, diagram.to_svg())?;
        self.next += 1;
        Ok(path)
    }

    /// Ticks `diagram` every `step` until it settles, writing each frame.
    pub fn write_until_settled(
        &mut self,
        diagram: &mut TrieDiagram,
        step: Duration,
    ) -> io::Result<usize> {
        let mut written = 0;
        loop {
            self.write(diagram)?;
            written += 1;
            if !diagram.is_animating() {
                return Ok(written);
            }
            let next = diagram.now() + step;
            diagram.tick(next);
        }
    }

    /// Number of frames written so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.next
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
