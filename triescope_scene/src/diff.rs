// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// Classification of keys between two frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    /// Keys only in the new set, in new-set order.
    pub enter: Vec<K>,
    /// Keys in both sets, in new-set order.
    pub update: Vec<K>,
    /// Keys only in the previous set, in previous-set order.
    pub exit: Vec<K>,
}

impl<K> Default for KeyedDiff<K> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<K> KeyedDiff<K> {
    /// Returns `true` if nothing entered or exited.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Compares `previous` against `next` by key.
///
/// Repeated keys in `next` are classified once, at their first occurrence.
pub fn diff_keys<K, P, N>(previous: P, next: N) -> KeyedDiff<K>
where
    K: Eq + Hash + Clone,
    P: IntoIterator<Item = K>,
    N: IntoIterator<Item = K>,
{
    let previous: Vec<K> = previous.into_iter().collect();
    let before: HashSet<&K> = previous.iter().collect();
    let mut seen: HashSet<K> = HashSet::new();
    let mut diff = KeyedDiff::default();
    for key in next {
        if !seen.insert(key.clone()) {
            continue;
        }
        if before.contains(&key) {
            diff.update.push(key);
        } else {
            diff.enter.push(key);
        }
    }
    diff.exit = previous
        .iter()
        .filter(|k| !seen.contains(*k))
        .cloned()
        .collect();
    diff
}
