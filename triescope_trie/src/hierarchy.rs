// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable snapshots of a [`Trie`](crate::Trie).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Stable key of a [`HierarchyNode`].
///
/// Every non-root node is identified by the full prefix leading to it. The
/// root is a separate variant rather than a reserved string, so no word can
/// ever produce a key equal to it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrefixId {
    /// The root of the trie.
    Root,
    /// A non-empty prefix.
    Prefix(String),
}

impl PrefixId {
    /// Returns the prefix spelled by this key (empty for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "",
            Self::Prefix(p) => p,
        }
    }

    /// Returns the keys of every node on the path to `prefix`.
    ///
    /// The result starts with [`PrefixId::Root`] and then lists every
    /// non-empty prefix of `prefix`, shortest first. Whether those nodes
    /// exist in any particular trie is not checked.
    ///
    /// ```
    /// use triescope_trie::PrefixId;
    ///
    /// let path = PrefixId::path_to("car");
    /// assert_eq!(path[0], PrefixId::Root);
    /// assert_eq!(path[3], PrefixId::from("car"));
    /// assert_eq!(path.len(), 4);
    /// ```
    #[must_use]
    pub fn path_to(prefix: &str) -> Vec<Self> {
        let mut out = Vec::with_capacity(prefix.chars().count() + 1);
        out.push(Self::Root);
        out.extend(
            prefix
                .char_indices()
                .map(|(i, c)| Self::Prefix(String::from(&prefix[..i + c.len_utf8()]))),
        );
        out
    }
}

impl From<&str> for PrefixId {
    /// Builds a prefix key. The empty string maps to [`PrefixId::Root`].
    fn from(prefix: &str) -> Self {
        if prefix.is_empty() {
            Self::Root
        } else {
            Self::Prefix(String::from(prefix))
        }
    }
}

impl fmt::Display for PrefixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Prefix(p) => f.write_str(p),
        }
    }
}

/// One node of an exported trie snapshot.
///
/// Children are sorted by character ascending, which fixes their
/// left-to-right placement in a layout. Snapshots are plain data: two
/// exports of the same trie state compare equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Key of this node.
    pub id: PrefixId,
    /// Character on the edge into this node; `None` for the root.
    pub ch: Option<char>,
    /// Full prefix from the root to this node; empty for the root.
    pub path: String,
    /// Whether a word ends here.
    pub is_terminal: bool,
    /// Words ending here.
    pub words: Vec<String>,
    /// Children, sorted by [`HierarchyNode::ch`].
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Returns `true` for the root node.
    #[must_use]
    #[inline]
    pub fn is_root(&self) -> bool {
        self.id == PrefixId::Root
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always `false`: a subtree contains at least its own root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pre-order traversal, visiting children in stored order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: alloc::vec![self],
        }
    }

    /// Finds the node for `path` in this subtree by walking its characters.
    ///
    /// `find("")` returns `self`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        let mut node = self;
        for c in path.chars() {
            let idx = node
                .children
                .binary_search_by(|child| child.ch.cmp(&Some(c)))
                .ok()?;
            node = &node.children[idx];
        }
        Some(node)
    }
}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut stack = core::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<'a> IntoIterator for &'a HierarchyNode {
    type Item = &'a HierarchyNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a [`HierarchyNode`] subtree.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trie;

    #[test]
    fn path_to_handles_multibyte_chars() {
        let path = PrefixId::path_to("añb");
        assert_eq!(
            path,
            [
                PrefixId::Root,
                PrefixId::from("a"),
                PrefixId::from("añ"),
                PrefixId::from("añb"),
            ]
        );
    }

    #[test]
    fn empty_prefix_is_root() {
        assert_eq!(PrefixId::from(""), PrefixId::Root);
        assert_eq!(PrefixId::path_to(""), [PrefixId::Root]);
        assert_eq!(alloc::format!("{}", PrefixId::Root), "<root>");
    }

    #[test]
    fn iter_is_preorder_in_sorted_order() {
        let mut trie = Trie::new();
        for w in ["b", "ab", "aa"] {
            trie.insert(w);
        }
        let root = trie.to_hierarchy();
        let order: Vec<&str> = root.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(order, ["", "a", "aa", "ab", "b"]);
        assert_eq!(root.len(), trie.node_count());
    }

    #[test]
    fn find_misses_absent_paths() {
        let mut trie = Trie::new();
        trie.insert("cat");
        let root = trie.to_hierarchy();
        assert!(root.find("cat").is_some_and(|n| n.is_terminal));
        assert!(root.find("cab").is_none());
        assert!(root.find("").is_some_and(HierarchyNode::is_root));
    }
}
