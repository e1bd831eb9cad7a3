//! Frequency-ranked three-tier alphabet.
//!
//! The 39 most frequent token bytes are split into three tiers of 13. Tier 1
//! symbols cost one nibble; tiers 2 and 3 cost an escape nibble plus an index.

use crate::front_coding::CodedToken;
use lx_core::{LexError, Result};

pub const TIER_SIZE: usize = 13;
pub const ALPHABET_SIZE: usize = TIER_SIZE * 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    fn slot(self) -> usize {
        usize::from(self.number() - 1)
    }
}

/// Where a byte lives in the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub tier: Tier,
    pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTables {
    tiers: [Vec<u8>; 3],
    lookup: [Option<Symbol>; 256],
}

impl Default for TierTables {
    fn default() -> Self {
        Self { tiers: Default::default(), lookup: [None; 256] }
    }
}

/// Occurrence count of every byte across token bodies. Sentinels are structural and not counted.
pub fn byte_frequencies(tokens: &[CodedToken]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for token in tokens {
        for &b in &token.body {
            counts[usize::from(b)] += 1;
        }
    }
    counts
}

impl TierTables {
    /// Rank occurring bytes by descending count, ties by ascending byte value.
    pub fn build(tokens: &[CodedToken]) -> Self {
        let counts = byte_frequencies(tokens);
        let mut ranked: Vec<u8> = (0..=255u8).filter(|&b| counts[usize::from(b)] > 0).collect();
        ranked.sort_by(|a, b| counts[usize::from(*b)].cmp(&counts[usize::from(*a)]));
        if ranked.len() > ALPHABET_SIZE {
            tracing::debug!(
                distinct = ranked.len(),
                "alphabet overflow: {} bytes left unranked",
                ranked.len() - ALPHABET_SIZE
            );
        }
        ranked.truncate(ALPHABET_SIZE);

        let mut tables = Self::default();
        for (tier, chunk) in Tier::ALL.iter().zip(ranked.chunks(TIER_SIZE)) {
            tables.tiers[tier.slot()] = chunk.to_vec();
        }
        tables.reindex();
        tables
    }

    /// Rebuild tables read back from an artifact.
    pub fn from_tiers(tier1: &[u8], tier2: &[u8], tier3: &[u8]) -> Result<Self> {
        let mut tables = Self::default();
        for (tier, bytes) in Tier::ALL.iter().zip([tier1, tier2, tier3]) {
            if bytes.len() > TIER_SIZE {
                return Err(LexError::InvalidArtifact(format!(
                    "tier {} holds {} symbols, limit is {}",
                    tier.number(),
                    bytes.len(),
                    TIER_SIZE
                )));
            }
            tables.tiers[tier.slot()] = bytes.to_vec();
        }
        tables.reindex();
        let distinct = tables.lookup.iter().filter(|s| s.is_some()).count();
        if distinct != tables.len() {
            return Err(LexError::InvalidArtifact("tier tables repeat a symbol".into()));
        }
        Ok(tables)
    }

    fn reindex(&mut self) {
        self.lookup = [None; 256];
        for tier in Tier::ALL {
            for (index, &b) in self.tiers[tier.slot()].iter().enumerate() {
                self.lookup[usize::from(b)].get_or_insert(Symbol { tier, index: index as u8 });
            }
        }
    }

    pub fn tier(&self, tier: Tier) -> &[u8] {
        &self.tiers[tier.slot()]
    }

    pub fn symbol(&self, byte: u8) -> Option<Symbol> {
        self.lookup[usize::from(byte)]
    }

    pub fn byte(&self, tier: Tier, index: u8) -> Option<u8> {
        self.tiers[tier.slot()].get(usize::from(index)).copied()
    }

    /// Total number of symbols across all tiers.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
