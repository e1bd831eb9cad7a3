//! Domain types shared by the compiler and the decoder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_SUFFIX_RULES: usize = 30;
pub const STANDALONE_FLAG: u8 = b'+';
pub const DERIVED_FLAG: u8 = b'/';

/// Bytes permitted inside a dictionary word.
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'\''
}

/// Tag character for suffix rule `index`.
pub fn suffix_tag(index: usize) -> u8 {
    b'a' + index as u8
}

/// Inverse of [`suffix_tag`].
pub fn tag_index(tag: u8) -> Option<usize> {
    tag.checked_sub(b'a').map(usize::from).filter(|&i| i < MAX_SUFFIX_RULES)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub index: usize,
    pub literal: String,
}

impl SuffixRule {
    pub fn new(index: usize, literal: impl Into<String>) -> Self {
        Self { index, literal: literal.into() }
    }

    pub fn tag(&self) -> u8 {
        suffix_tag(self.index)
    }

    pub fn len(&self) -> usize {
        self.literal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }
}

/// A stem plus the suffix rules that rebuild dictionary words from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootEntry {
    pub root: String,
    pub suffixes: BTreeSet<usize>,
    pub stands_alone: bool,
}

impl RootEntry {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into(), ..Default::default() }
    }

    /// Returns false if the suffix was already attached.
    pub fn attach(&mut self, index: usize) -> bool {
        self.suffixes.insert(index)
    }

    pub fn tags(&self) -> Vec<u8> {
        self.suffixes.iter().map(|&i| suffix_tag(i)).collect()
    }
}

/// Canonical textual form of one dictionary entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Bare(String),
    Marked { root: String, stands_alone: bool, tags: Vec<u8> },
}

impl Token {
    pub fn flag(&self) -> Option<u8> {
        match self {
            Self::Bare(_) => None,
            Self::Marked { stands_alone: true, .. } => Some(STANDALONE_FLAG),
            Self::Marked { .. } => Some(DERIVED_FLAG),
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Self::Marked { .. })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Bare(word) => word.as_bytes().to_vec(),
            Self::Marked { root, tags, .. } => {
                let mut out = Vec::with_capacity(root.len() + 1 + tags.len());
                out.extend_from_slice(root.as_bytes());
                out.extend(self.flag());
                out.extend_from_slice(tags);
                out
            }
        }
    }
}
