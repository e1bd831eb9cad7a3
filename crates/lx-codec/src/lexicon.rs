//! Lexicon loader: normalizes raw lines into a deduplicated word set.

use lx_core::types::is_word_byte;
use lx_core::CodecConfig;
use std::collections::BTreeSet;

/// Why an input line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    TooLong,
    InvalidChar(char),
    Duplicate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort => write!(f, "too short"),
            Self::TooLong => write!(f, "too long"),
            Self::InvalidChar(c) => write!(f, "invalid character {c:?}"),
            Self::Duplicate => write!(f, "duplicate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub source: String,
    pub line: usize,
    pub text: String,
    pub reason: RejectReason,
}

/// Per-run ingestion counters.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub rejections: Vec<Rejection>,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.accepted + self.duplicates + self.rejected
    }
}

/// The canonical word set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single anonymous source.
    pub fn load<I, S>(lines: I, config: &CodecConfig) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new();
        let mut report = LoadReport::default();
        lexicon.ingest("<input>", lines, config, &mut report);
        (lexicon, report)
    }

    /// Add every acceptable line from `lines`, accumulating into `report`.
    pub fn ingest<I, S>(&mut self, source: &str, lines: I, config: &CodecConfig, report: &mut LoadReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (idx, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim_end_matches(|c: char| c == '\n' || c == '\r');
            match self.insert_line(line, config) {
                Ok(()) => report.accepted += 1,
                Err(reason) => {
                    if reason == RejectReason::Duplicate {
                        report.duplicates += 1;
                    } else {
                        report.rejected += 1;
                    }
                    report.rejections.push(Rejection {
                        source: source.to_string(),
                        line: idx + 1,
                        text: line.to_string(),
                        reason,
                    });
                }
            }
        }
        if report.rejected + report.duplicates > 0 {
            tracing::debug!(
                source,
                rejected = report.rejected,
                duplicates = report.duplicates,
                "skipped input lines"
            );
        }
    }

    fn insert_line(&mut self, line: &str, config: &CodecConfig) -> Result<(), RejectReason> {
        if line.len() < config.min_word_len {
            return Err(RejectReason::TooShort);
        }
        if line.len() > config.max_word_len {
            return Err(RejectReason::TooLong);
        }
        let word = line.to_ascii_lowercase();
        if let Some(bad) = word.chars().find(|&c| !c.is_ascii() || !is_word_byte(c as u8)) {
            return Err(RejectReason::InvalidChar(bad));
        }
        if !self.words.insert(word) {
            return Err(RejectReason::Duplicate);
        }
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn into_words(self) -> BTreeSet<String> {
        self.words
    }
}

impl From<BTreeSet<String>> for Lexicon {
    fn from(words: BTreeSet<String>) -> Self {
        Self { words }
    }
}
