pub mod config;
pub mod error;
pub mod types;

pub use config::CodecConfig;
pub use error::{LexError, Result};
pub use types::{RootEntry, SuffixRule, Token};
