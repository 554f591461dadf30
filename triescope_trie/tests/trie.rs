// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `triescope_trie` crate.
//!
//! These exercise insertion, counting, and the shape of exported
//! hierarchies, including the ordering guarantees layouts depend on.

use proptest::prelude::*;
use triescope_trie::{HierarchyNode, InsertError, PrefixId, Trie};

#[test]
fn empty_trie_has_only_the_root() {
    let trie = Trie::new();
    assert!(trie.is_empty());
    assert_eq!(trie.word_count(), 0);
    assert_eq!(trie.node_count(), 1);
    assert!(trie.words().is_empty());

    let root = trie.to_hierarchy();
    assert!(root.is_root());
    assert_eq!(root.ch, None);
    assert_eq!(root.path, "");
    assert!(root.children.is_empty());
}

#[test]
fn cat_car_card_shares_prefixes() {
    let mut trie = Trie::new();
    for w in ["cat", "car", "card"] {
        assert!(trie.insert(w));
    }
    assert_eq!(trie.word_count(), 3);
    assert_eq!(trie.node_count(), 6);

    let root = trie.to_hierarchy();
    assert_eq!(root.children.len(), 1);
    let c = &root.children[0];
    assert_eq!(c.id, PrefixId::from("c"));
    let a = &c.children[0];
    assert_eq!(a.path, "ca");
    assert!(!a.is_terminal);

    let [r, t] = a.children.as_slice() else {
        panic!("expected two children under \"ca\", got {:?}", a.children);
    };
    assert_eq!(r.ch, Some('r'));
    assert!(r.is_terminal);
    assert_eq!(r.words, ["car"]);
    assert_eq!(t.ch, Some('t'));
    assert_eq!(t.words, ["cat"]);

    let d = &r.children[0];
    assert_eq!(d.id, PrefixId::from("card"));
    assert!(d.is_terminal);
    assert!(d.children.is_empty());
}

#[test]
fn empty_word_is_a_no_op() {
    let mut trie = Trie::new();
    trie.insert("x");
    let before = (trie.word_count(), trie.node_count(), trie.words());

    assert!(!trie.insert(""));
    assert_eq!(trie.try_insert(""), Err(InsertError::Empty));
    assert_eq!(before, (trie.word_count(), trie.node_count(), trie.words()));
}

#[test]
fn duplicate_is_rejected_without_mutation() {
    let mut trie = Trie::new();
    assert!(trie.insert("the"));
    let before = (trie.word_count(), trie.node_count(), trie.words());

    assert!(!trie.insert("the"));
    assert_eq!(trie.try_insert("the"), Err(InsertError::Duplicate));
    assert_eq!(before, (trie.word_count(), trie.node_count(), trie.words()));
}

#[test]
fn words_is_a_defensive_copy() {
    let mut trie = Trie::new();
    trie.insert("one");
    let mut copy = trie.words();
    copy.push("two".into());
    copy[0].push('!');
    assert_eq!(trie.words(), ["one"]);
}

#[test]
fn clear_then_reinsert_matches_a_fresh_trie() {
    let words = ["tea", "ten", "inn", "to", "i"];

    let mut reused = Trie::new();
    for w in ["zebra", "tea", "x"] {
        reused.insert(w);
    }
    reused.clear();
    assert_eq!(reused.node_count(), 1);
    assert!(reused.words().is_empty());
    for w in words {
        assert!(reused.insert(w));
    }

    let mut fresh = Trie::new();
    for w in words {
        fresh.insert(w);
    }

    assert_eq!(reused.to_hierarchy(), fresh.to_hierarchy());
    assert_eq!(reused.words(), fresh.words());
}

#[test]
fn insert_error_displays() {
    assert_eq!(InsertError::Empty.to_string(), "cannot insert an empty word");
    assert_eq!(InsertError::Duplicate.to_string(), "word is already present");
}

#[test]
fn deep_words_export_and_drop_on_a_small_stack() {
    // Far deeper than a 256 KiB stack could hold one frame per character.
    let depth = 10_000;
    let worker = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(move || {
            let word = "a".repeat(depth);
            let mut trie = Trie::new();
            assert!(trie.insert(&word));
            assert!(trie.insert("ab"));
            assert_eq!(trie.node_count(), depth + 2);

            let root = trie.to_hierarchy();
            assert_eq!(root.len(), depth + 2);
            let leaf = root.find(&word).expect("the deep word is exported");
            assert!(leaf.is_terminal);
            assert_eq!(leaf.words, [word.clone()]);
            let a = &root.children[0];
            assert_eq!(a.children.len(), 2);
            assert_eq!(a.children[1].id, PrefixId::from("ab"));

            drop(root);
            trie.clear();
            assert_eq!(trie.node_count(), 1);
        })
        .expect("spawn test thread");
    worker.join().expect("deep trie worker panicked");
}

fn assert_sorted_with_paths(node: &HierarchyNode) {
    for pair in node.children.windows(2) {
        assert!(pair[0].ch < pair[1].ch, "children out of order at {:?}", node.id);
    }
    for child in &node.children {
        let mut expected = node.path.clone();
        expected.push(child.ch.expect("non-root nodes carry a character"));
        assert_eq!(child.path, expected);
        assert_eq!(child.id, PrefixId::Prefix(expected));
        assert_sorted_with_paths(child);
    }
}

proptest! {
    #[test]
    fn word_list_tracks_first_occurrences(words in prop::collection::vec("[a-e]{1,5}", 0..24)) {
        let mut trie = Trie::new();
        let mut expected: Vec<String> = Vec::new();
        for w in &words {
            let fresh = !expected.contains(w);
            prop_assert_eq!(trie.insert(w), fresh);
            if fresh {
                expected.push(w.clone());
            }
        }
        prop_assert_eq!(trie.word_count(), expected.len());
        prop_assert_eq!(trie.words(), expected);
    }

    #[test]
    fn hierarchy_is_sorted_and_paths_concatenate(words in prop::collection::vec("[a-z]{1,6}", 0..16)) {
        let mut trie = Trie::new();
        for w in &words {
            trie.insert(w);
        }
        let root = trie.to_hierarchy();
        assert_sorted_with_paths(&root);
        prop_assert_eq!(root.len(), trie.node_count());
        prop_assert_eq!(&root, &trie.to_hierarchy());
        for w in &words {
            prop_assert!(root.find(w).is_some_and(|n| n.is_terminal));
        }
    }
}
