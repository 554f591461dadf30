// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Why [`Trie::try_insert`](crate::Trie::try_insert) rejected a word.
///
/// Neither case mutates the trie.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InsertError {
    /// The word was empty.
    Empty,
    /// The word was already stored.
    Duplicate,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("cannot insert an empty word"),
            Self::Duplicate => f.write_str("word is already present"),
        }
    }
}

impl core::error::Error for InsertError {}
