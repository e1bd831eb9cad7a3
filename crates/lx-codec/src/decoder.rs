//! Decoder: nibble stream back to tokens, tokens back to words.

use crate::alphabet::{Tier, TierTables};
use crate::front_coding::CodedToken;
use crate::nibble::{NibbleReader, TERMINATOR, TIER2_ESCAPE, TIER3_ESCAPE};
use lx_core::types::{tag_index, DERIVED_FLAG, STANDALONE_FLAG};
use lx_core::{LexError, Result};
use std::collections::BTreeSet;

/// Stateful token reader; each token may borrow a prefix of the one before it.
pub struct TokenReader<'a> {
    nibbles: NibbleReader<'a>,
    tables: &'a TierTables,
    previous: Vec<u8>,
}

impl<'a> TokenReader<'a> {
    pub fn new(stream: &'a [u8], tables: &'a TierTables) -> Self {
        Self { nibbles: NibbleReader::new(stream), tables, previous: Vec::new() }
    }

    /// Next full token text, or `None` at end of stream.
    pub fn next_token(&mut self) -> Result<Option<&[u8]>> {
        if self.nibbles.at_end() {
            return Ok(None);
        }
        let shared = self.nibbles.next_nibble()?;
        let mut body = Vec::new();
        loop {
            let nibble = self.nibbles.next_nibble()?;
            let (tier, index) = match nibble {
                TERMINATOR => break,
                TIER2_ESCAPE => (Tier::Two, self.nibbles.next_nibble()?),
                TIER3_ESCAPE => (Tier::Three, self.nibbles.next_nibble()?),
                n => (Tier::One, n),
            };
            let byte = self
                .tables
                .byte(tier, index)
                .ok_or(LexError::TierIndex { tier: tier.number(), index })?;
            body.push(byte);
        }
        self.previous = CodedToken { shared, body }.restore(&self.previous)?;
        Ok(Some(self.previous.as_slice()))
    }

    /// Drain all remaining tokens in stream order.
    pub fn collect_tokens(mut self) -> Result<Vec<Vec<u8>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token.to_vec());
        }
        Ok(tokens)
    }
}

/// Record every word a decoded token stands for.
pub fn expand_token(token: &[u8], suffixes: &[Option<String>], out: &mut BTreeSet<String>) -> Result<()> {
    let text = std::str::from_utf8(token)
        .map_err(|_| LexError::InvalidArtifact("decoded token is not valid UTF-8".into()))?;

    let plus = token.iter().position(|&b| b == STANDALONE_FLAG);
    if let Some(p) = plus {
        out.insert(text[..p].to_string());
    }

    let Some(delim) = plus.or_else(|| token.iter().position(|&b| b == DERIVED_FLAG)) else {
        out.insert(text.to_string());
        return Ok(());
    };

    let root = &text[..delim];
    for &tag in &token[delim + 1..] {
        let index = tag_index(tag)
            .filter(|&i| i < suffixes.len())
            .ok_or(LexError::UnknownSuffixTag { tag: char::from(tag) })?;
        let literal = suffixes[index]
            .as_deref()
            .ok_or(LexError::UnusedSuffix { index })?;
        out.insert(format!("{root}{literal}"));
    }
    Ok(())
}

/// Decode a packed stream into the full word set.
pub fn decode_words(stream: &[u8], tables: &TierTables, suffixes: &[Option<String>]) -> Result<BTreeSet<String>> {
    let mut reader = TokenReader::new(stream, tables);
    let mut words = BTreeSet::new();
    let mut tokens = 0usize;
    while let Some(token) = reader.next_token()? {
        expand_token(token, suffixes, &mut words)?;
        tokens += 1;
    }
    tracing::debug!(tokens, words = words.len(), "decoded dictionary");
    Ok(words)
}

/// Decode from the five raw artifact parts.
pub fn decode_parts(
    tier1: &[u8],
    tier2: &[u8],
    tier3: &[u8],
    suffixes: &[Option<String>],
    stream: &[u8],
) -> Result<BTreeSet<String>> {
    let tables = TierTables::from_tiers(tier1, tier2, tier3)?;
    decode_words(stream, &tables, suffixes)
}
