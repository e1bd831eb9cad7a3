//! Canonical ordering and front coding against the previous token.

use lx_core::types::Token;
use lx_core::{LexError, Result};

pub const MAX_SHARED_PREFIX: usize = 15;
pub const MIN_SHARED_PREFIX: usize = 2;
pub const SENTINEL_BASE: u8 = 0xF0;

/// A token after prefix sharing. `shared` is 0 or in `2..=15`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodedToken {
    pub shared: u8,
    pub body: Vec<u8>,
}

impl CodedToken {
    pub fn plain(body: impl Into<Vec<u8>>) -> Self {
        Self { shared: 0, body: body.into() }
    }

    pub fn is_shared(&self) -> bool {
        self.shared > 0
    }

    /// Sentinel form: `0xF0 | shared` followed by the unshared tail.
    pub fn to_sentinel_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 1);
        if self.is_shared() {
            out.push(SENTINEL_BASE | self.shared);
        }
        out.extend_from_slice(&self.body);
        out
    }

    pub fn from_sentinel_bytes(bytes: &[u8]) -> Self {
        match bytes.split_first() {
            Some((&first, rest)) if first >= SENTINEL_BASE => Self {
                shared: first & 0x0F,
                body: rest.to_vec(),
            },
            _ => Self::plain(bytes),
        }
    }

    /// Rebuild full token text given the previous decoded token.
    pub fn restore(&self, previous: &[u8]) -> Result<Vec<u8>> {
        let shared = usize::from(self.shared);
        if shared > previous.len() {
            return Err(LexError::PrefixOutOfBounds { shared, available: previous.len() });
        }
        let mut out = Vec::with_capacity(shared + self.body.len());
        out.extend_from_slice(&previous[..shared]);
        out.extend_from_slice(&self.body);
        Ok(out)
    }
}

/// Token texts in byte-lexicographic order.
pub fn sort_tokens(tokens: &[Token]) -> Vec<Vec<u8>> {
    let mut sorted: Vec<Vec<u8>> = tokens.iter().map(Token::to_bytes).collect();
    sorted.sort_unstable();
    sorted
}

pub fn shared_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Front-code an already sorted token list.
pub fn front_code(sorted: &[Vec<u8>]) -> Vec<CodedToken> {
    let mut previous: &[u8] = &[];
    let mut coded = Vec::with_capacity(sorted.len());
    for token in sorted {
        let shared = shared_prefix_len(previous, token).min(MAX_SHARED_PREFIX);
        if shared >= MIN_SHARED_PREFIX {
            coded.push(CodedToken {
                shared: shared as u8,
                body: token[shared..].to_vec(),
            });
        } else {
            coded.push(CodedToken::plain(token.as_slice()));
        }
        previous = token.as_slice();
    }
    coded
}
