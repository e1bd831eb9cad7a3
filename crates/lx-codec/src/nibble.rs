//! Nibble stream encoding and packing.

use crate::alphabet::{Tier, TierTables};
use crate::front_coding::CodedToken;
use lx_core::{LexError, Result};

pub const TIER2_ESCAPE: u8 = 0xD;
pub const TIER3_ESCAPE: u8 = 0xE;
pub const TERMINATOR: u8 = 0xF;
pub const PAD: u8 = 0xF;

/// Accumulates 4-bit units.
#[derive(Debug, Clone, Default)]
pub struct NibbleWriter {
    nibbles: Vec<u8>,
}

impl NibbleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, nibble: u8) {
        debug_assert!(nibble <= 0xF);
        self.nibbles.push(nibble & 0xF);
    }

    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    pub fn nibbles(&self) -> &[u8] {
        &self.nibbles
    }

    /// Two nibbles per byte, high first; odd counts end with a pad nibble.
    pub fn pack(&self) -> Vec<u8> {
        self.nibbles
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(PAD))
            .collect()
    }
}

/// Sequential reader over a packed nibble stream.
#[derive(Debug, Clone)]
pub struct NibbleReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> NibbleReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Nibble offset of the next read.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() * 2 - self.pos
    }

    pub fn peek(&self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos / 2)?;
        Some(if self.pos % 2 == 0 { byte >> 4 } else { byte & 0xF })
    }

    pub fn next_nibble(&mut self) -> Result<u8> {
        let nibble = self.peek().ok_or(LexError::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(nibble)
    }

    /// True once only the optional pad nibble is left.
    pub fn at_end(&self) -> bool {
        match self.remaining() {
            0 => true,
            1 => self.peek() == Some(PAD),
            _ => false,
        }
    }
}

/// Append one token: shared count, symbols, terminator.
pub fn encode_token(token: &CodedToken, tables: &TierTables, out: &mut NibbleWriter) -> Result<()> {
    out.push(token.shared);
    for &b in &token.body {
        let symbol = tables.symbol(b).ok_or_else(|| LexError::UnknownByte {
            byte: b,
            token: String::from_utf8_lossy(&token.body).into_owned(),
        })?;
        match symbol.tier {
            Tier::One => {}
            Tier::Two => out.push(TIER2_ESCAPE),
            Tier::Three => out.push(TIER3_ESCAPE),
        }
        out.push(symbol.index);
    }
    out.push(TERMINATOR);
    Ok(())
}

/// Encode the whole token list into nibbles.
pub fn encode_stream(tokens: &[CodedToken], tables: &TierTables) -> Result<NibbleWriter> {
    let mut out = NibbleWriter::new();
    for token in tokens {
        encode_token(token, tables, &mut out)?;
    }
    Ok(out)
}
