//! Lexpack codec — compiles a word list into a compact nibble-coded dictionary.
//!
//! Stages:
//! 1. Lexicon loading (normalize, dedupe)
//! 2. Suffix factoring — fold inflections into root entries
//! 3. Token canonicalization — one textual token per entity
//! 4. Ordering and front coding against the previous token
//! 5. Three-tier nibble alphabet and stream packing
//!
//! The decoder reverses stages 5 through 2 and yields the original word set.

pub mod alphabet;
pub mod artifact;
pub mod decoder;
pub mod front_coding;
pub mod lexicon;
pub mod nibble;
pub mod pipeline;
pub mod suffix;
pub mod token;

pub use artifact::DictionaryArtifact;
pub use lexicon::{Lexicon, LoadReport};
pub use pipeline::{CompilationContext, CompileResult, CompileStats, DictionaryCompiler};
