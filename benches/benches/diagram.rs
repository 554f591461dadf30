// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full render passes and SVG export.

use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use triescope::{DiagramConfig, TrieDiagram};
use triescope_benches::words;

fn bench_render_pass(c: &mut Criterion) {
    let input = words(500, 8, 5, 0xfeed);
    c.bench_function("diagram_add_words_500", |b| {
        b.iter_batched(
            || TrieDiagram::new(DiagramConfig::default()),
            |mut diagram| black_box(diagram.add_words(&input)),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("diagram_incremental_word", |b| {
        b.iter_batched(
            || {
                let mut diagram = TrieDiagram::new(DiagramConfig::default());
                diagram.add_words(&input);
                diagram.tick(Duration::from_secs(1));
                diagram
            },
            |mut diagram| black_box(diagram.add_word("zzzzzz")),
            BatchSize::SmallInput,
        );
    });
}

fn bench_svg(c: &mut Criterion) {
    let mut diagram = TrieDiagram::new(DiagramConfig::default());
    diagram.add_words(words(500, 8, 5, 0xfeed));
    diagram.tick(Duration::from_millis(200));
    c.bench_function("diagram_to_svg_500", |b| b.iter(|| black_box(diagram.to_svg())));
}

criterion_group!(benches, bench_render_pass, bench_svg);
criterion_main!(benches);
