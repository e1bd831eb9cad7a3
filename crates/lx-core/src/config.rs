use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LexError, Result};
use crate::types::{is_word_byte, MAX_SUFFIX_RULES};

/// Default suffix table, in priority order.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "ations", "ation", "ments", "ment", "ness", "ings", "ing", "able", "less", "ists",
    "ally", "ful", "ers", "est", "ies", "ied", "ism", "ist", "ity", "ive",
    "'s", "ed", "er", "es", "ly", "al", "s", "y",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub min_word_len: usize,
    pub max_word_len: usize,
    /// Single-suffix roots whose literal is at most this long are stored as plain words.
    pub inline_suffix_max_len: usize,
    pub suffixes: Vec<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            min_word_len: 2,
            max_word_len: 32,
            inline_suffix_max_len: 2,
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CodecConfig {
    pub fn with_suffixes<S: AsRef<str>>(mut self, suffixes: &[S]) -> Self {
        self.suffixes = suffixes.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_word_len == 0 || self.min_word_len > self.max_word_len {
            return Err(LexError::InvalidConfig(format!(
                "word length bounds {}..={} are inconsistent",
                self.min_word_len, self.max_word_len
            )));
        }
        if self.suffixes.len() > MAX_SUFFIX_RULES {
            return Err(LexError::InvalidConfig(format!(
                "{} suffix rules given, at most {} are addressable",
                self.suffixes.len(),
                MAX_SUFFIX_RULES
            )));
        }
        let mut seen = HashSet::new();
        for suffix in &self.suffixes {
            if suffix.is_empty() || suffix.len() >= self.max_word_len {
                return Err(LexError::InvalidConfig(format!("suffix {suffix:?} has an unusable length")));
            }
            if !suffix.bytes().all(is_word_byte) {
                return Err(LexError::InvalidConfig(format!("suffix {suffix:?} contains non-word characters")));
            }
            if !seen.insert(suffix.as_str()) {
                return Err(LexError::InvalidConfig(format!("suffix {suffix:?} listed twice")));
            }
        }
        Ok(())
    }
}
