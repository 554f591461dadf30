// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion and hierarchy export.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use triescope_benches::words;
use triescope_trie::Trie;

fn build(words: &[String]) -> Trie {
    let mut trie = Trie::new();
    for w in words {
        trie.insert(w);
    }
    trie
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_insert");
    for &n in &[100_usize, 1_000, 10_000] {
        let input = words(n, 10, 6, 0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| black_box(build(input)));
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_to_hierarchy");
    for &n in &[100_usize, 1_000, 10_000] {
        let trie = build(&words(n, 10, 6, 0x5eed));
        group.bench_with_input(BenchmarkId::from_parameter(n), &trie, |b, trie| {
            b.iter(|| black_box(trie.to_hierarchy()));
        });
    }
    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let input = words(1_000, 10, 6, 0xd0b);
    c.bench_function("trie_insert_duplicates_1000", |b| {
        b.iter_batched(
            || build(&input),
            |mut trie| {
                for w in &input {
                    black_box(trie.insert(w));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_insert, bench_export, bench_duplicates);
criterion_main!(benches);
