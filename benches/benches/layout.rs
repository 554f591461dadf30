// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy tree layout over trie snapshots and synthetic trees.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use triescope_benches::{Lcg, words};
use triescope_layout::TidyTree;
use triescope_trie::Trie;

struct Node(Vec<Node>);

fn random_tree(n: usize, seed: u64) -> Node {
    // Attach each new node under a random earlier node, then rebuild as
    // an owned tree.
    let mut rng = Lcg::new(seed);
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];
    for i in 1..n {
        let parent = rng.gen_range_usize(i);
        children[parent].push(i);
        children.push(Vec::new());
    }
    fn build(i: usize, children: &[Vec<usize>]) -> Node {
        Node(children[i].iter().map(|&c| build(c, children)).collect())
    }
    build(0, &children)
}

fn bench_trie_layout(c: &mut Criterion) {
    let tidy = TidyTree::new(Size::new(50.0, 80.0));
    let mut group = c.benchmark_group("layout_trie");
    for &n in &[100_usize, 1_000, 10_000] {
        let mut trie = Trie::new();
        for w in words(n, 10, 6, 0x1a7) {
            trie.insert(&w);
        }
        let root = trie.to_hierarchy();
        group.bench_with_input(BenchmarkId::from_parameter(n), &root, |b, root| {
            b.iter(|| black_box(tidy.layout(root, |n| n.children.as_slice())));
        });
    }
    group.finish();
}

fn bench_random_tree_layout(c: &mut Criterion) {
    let tidy = TidyTree::new(Size::new(1.0, 1.0));
    let mut group = c.benchmark_group("layout_random_tree");
    for &n in &[1_000_usize, 10_000] {
        let tree = random_tree(n, 0xace);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| black_box(tidy.layout(tree, |n| n.0.as_slice())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trie_layout, bench_random_tree_layout);
criterion_main!(benches);
