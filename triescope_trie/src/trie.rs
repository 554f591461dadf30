// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable trie.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::InsertError;
use crate::hierarchy::{HierarchyNode, PrefixId};

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_terminal: bool,
    terminal_words: Vec<String>,
}

impl TrieNode {
    fn count(&self) -> usize {
        // Iterative so deep words cannot overflow the stack.
        let mut total = 0;
        let mut stack: Vec<&Self> = alloc::vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.values());
        }
        total
    }

    /// Builds the sorted snapshot bottom-up with an explicit stack.
    fn export(&self) -> HierarchyNode {
        struct Frame<'a> {
            node: &'a TrieNode,
            ch: Option<char>,
            path: String,
            pending: alloc::vec::IntoIter<char>,
            done: Vec<HierarchyNode>,
        }

        fn frame(node: &TrieNode, ch: Option<char>, path: String) -> Frame<'_> {
            let mut keys: Vec<char> = node.children.keys().copied().collect();
            keys.sort_unstable();
            Frame {
                node,
                ch,
                path,
                done: Vec::with_capacity(keys.len()),
                pending: keys.into_iter(),
            }
        }

        fn finish(frame: Frame<'_>) -> HierarchyNode {
            let id = match frame.ch {
                None => PrefixId::Root,
                Some(_) => PrefixId::Prefix(frame.path.clone()),
            };
            HierarchyNode {
                id,
                ch: frame.ch,
                path: frame.path,
                is_terminal: frame.node.is_terminal,
                words: frame.node.terminal_words.clone(),
                children: frame.done,
            }
        }

        let mut root = frame(self, None, String::new());
        let mut stack: Vec<Frame<'_>> = Vec::new();
        loop {
            let top = stack.last_mut().unwrap_or(&mut root);
            let node = top.node;
            let next = top.pending.next().map(|c| {
                let mut path = top.path.clone();
                path.push(c);
                frame(&node.children[&c], Some(c), path)
            });
            if let Some(child) = next {
                stack.push(child);
                continue;
            }
            match stack.pop() {
                Some(done) => {
                    let exported = finish(done);
                    stack.last_mut().unwrap_or(&mut root).done.push(exported);
                }
                None => return finish(root),
            }
        }
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Unlink children first so dropping a long chain stays flat.
        let mut stack: Vec<Self> = self.children.drain().map(|(_, n)| n).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, n)| n));
        }
    }
}

/// An uncompressed prefix tree over `char`s.
///
/// Children are stored unordered and sorted only when a snapshot is taken
/// with [`Trie::to_hierarchy`]. Words are never removed individually; use
/// [`Trie::clear`] to start over.
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: TrieNode,
    words: Vec<String>,
}

impl Trie {
    /// Creates an empty trie containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `word`, returning `true` if it was newly stored.
    ///
    /// Empty words and words already present are rejected with `false` and
    /// leave the trie untouched. See [`Trie::try_insert`] for the reason.
    pub fn insert(&mut self, word: &str) -> bool {
        self.try_insert(word).is_ok()
    }

    /// Inserts `word`, reporting why it was rejected if it was.
    pub fn try_insert(&mut self, word: &str) -> Result<(), InsertError> {
        if word.is_empty() {
            return Err(InsertError::Empty);
        }
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        if node.is_terminal {
            return Err(InsertError::Duplicate);
        }
        node.is_terminal = true;
        node.terminal_words.push(String::from(word));
        self.words.push(String::from(word));
        Ok(())
    }

    /// Returns `true` if `word` was inserted exactly.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &self.root;
        for c in word.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_terminal
    }

    /// Returns a copy of the accepted words in insertion order.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.words.clone()
    }

    /// Number of accepted words.
    #[must_use]
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no word has been accepted.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of nodes, including the root.
    ///
    /// This walks the whole tree. An empty trie has one node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Exports an immutable snapshot with children sorted by character.
    ///
    /// Nothing is cached; every call sorts again.
    #[must_use]
    pub fn to_hierarchy(&self) -> HierarchyNode {
        self.root.export()
    }

    /// Removes every word and node except the root.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.words.clear();
    }
}
