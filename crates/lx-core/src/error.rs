use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("Unknown byte 0x{byte:02x} in token {token:?}: not in the 39-symbol alphabet")]
    UnknownByte { byte: u8, token: String },
    #[error("Root entry {root:?} has no suffixes and does not stand alone")]
    RootInvariant { root: String },
    #[error("Nibble stream truncated at nibble {offset}")]
    Truncated { offset: usize },
    #[error("Tier {tier} has no symbol at index {index}")]
    TierIndex { tier: u8, index: u8 },
    #[error("Shared prefix {shared} exceeds previous token length {available}")]
    PrefixOutOfBounds { shared: usize, available: usize },
    #[error("Unknown suffix tag {tag:?}")]
    UnknownSuffixTag { tag: char },
    #[error("Suffix slot {index} is marked unused")]
    UnusedSuffix { index: usize },
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Round trip mismatch: {missing} missing, {extra} unexpected")]
    VerifyMismatch { missing: usize, extra: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LexError>;
