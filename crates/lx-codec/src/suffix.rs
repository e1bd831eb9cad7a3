//! Suffix factoring: folds inflected words into root entries.

use lx_core::types::{RootEntry, SuffixRule};
use lx_core::{CodecConfig, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Ordered suffix rules. Table order decides which rule claims a word first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTable {
    rules: Vec<SuffixRule>,
}

impl SuffixTable {
    pub fn new<S: AsRef<str>>(literals: &[S]) -> Self {
        let rules = literals
            .iter()
            .enumerate()
            .map(|(i, s)| SuffixRule::new(i, s.as_ref()))
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(&config.suffixes))
    }

    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&SuffixRule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Output of the factoring pass.
#[derive(Debug, Clone, Default)]
pub struct Factoring {
    pub roots: BTreeMap<String, RootEntry>,
    /// Words no rule matched.
    pub bare: BTreeSet<String>,
    /// Words claimed per suffix rule.
    pub occurrences: Vec<usize>,
}

impl Factoring {
    pub fn standalone_roots(&self) -> usize {
        self.roots.values().filter(|r| r.stands_alone).count()
    }
}

/// Factor `words` against `table`.
pub fn factor<'a, I>(words: I, table: &SuffixTable) -> Factoring
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unfactored: BTreeSet<String> = words.into_iter().map(str::to_string).collect();
    let mut roots: BTreeMap<String, RootEntry> = BTreeMap::new();
    let mut occurrences = vec![0usize; table.len()];

    for rule in table.rules() {
        let candidates: Vec<String> = unfactored
            .iter()
            .filter(|w| w.len() > rule.len() && w.ends_with(rule.literal.as_str()))
            .cloned()
            .collect();

        for word in candidates {
            // An earlier closure in this pass may already have claimed it.
            if !unfactored.remove(&word) {
                continue;
            }
            let root = &word[..word.len() - rule.len()];
            occurrences[rule.index] += 1;

            let entry = roots.entry(root.to_string()).or_insert_with(|| RootEntry::new(root));
            entry.attach(rule.index);
            if unfactored.remove(root) {
                entry.stands_alone = true;
            }
            close_root(entry, rule.index, table, &mut unfactored, &mut occurrences);
        }
    }

    tracing::debug!(
        roots = roots.len(),
        bare = unfactored.len(),
        "suffix factoring complete"
    );

    Factoring { roots, bare: unfactored, occurrences }
}

/// Attach every other rule whose inflection of `entry.root` is still a word.
fn close_root(
    entry: &mut RootEntry,
    matched: usize,
    table: &SuffixTable,
    unfactored: &mut BTreeSet<String>,
    occurrences: &mut [usize],
) {
    let mut pending: Vec<usize> = (0..table.len()).rev().filter(|&j| j != matched).collect();
    let mut candidate = String::with_capacity(entry.root.len() + 8);
    while let Some(j) = pending.pop() {
        let Some(rule) = table.get(j) else { continue };
        candidate.clear();
        candidate.push_str(&entry.root);
        candidate.push_str(&rule.literal);
        if unfactored.remove(candidate.as_str()) {
            entry.attach(j);
            occurrences[j] += 1;
        }
    }
}
