//! Token canonicalization.

use crate::suffix::{Factoring, SuffixTable};
use lx_core::types::{RootEntry, Token};
use lx_core::{LexError, Result};

/// Turn every factored entity into exactly one token.
pub fn canonicalize(factoring: &Factoring, table: &SuffixTable, inline_max: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(factoring.roots.len() + factoring.bare.len());
    for entry in factoring.roots.values() {
        tokens.push(root_token(entry, table, inline_max)?);
    }
    tokens.extend(factoring.bare.iter().cloned().map(Token::Bare));
    Ok(tokens)
}

/// Cheapest token for one root entry.
pub fn root_token(entry: &RootEntry, table: &SuffixTable, inline_max: usize) -> Result<Token> {
    if entry.suffixes.is_empty() {
        if entry.stands_alone {
            return Ok(Token::Bare(entry.root.clone()));
        }
        return Err(LexError::RootInvariant { root: entry.root.clone() });
    }

    if entry.suffixes.len() == 1 && !entry.stands_alone {
        if let Some(rule) = entry.suffixes.first().and_then(|&i| table.get(i)) {
            if rule.len() <= inline_max {
                return Ok(Token::Bare(format!("{}{}", entry.root, rule.literal)));
            }
        }
    }

    Ok(Token::Marked {
        root: entry.root.clone(),
        stands_alone: entry.stands_alone,
        tags: entry.tags(),
    })
}
