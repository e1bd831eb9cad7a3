//! The compiled dictionary and its binary container.

use crate::alphabet::{TierTables, TIER_SIZE};
use crate::decoder;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use lx_core::types::MAX_SUFFIX_RULES;
use lx_core::{LexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};

pub const MAGIC: &[u8; 4] = b"LXD1";
/// Length byte marking a suffix slot no root uses.
pub const UNUSED_SLOT: u8 = 0xFF;

/// Everything a consumer needs to rebuild the word list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryArtifact {
    pub tier1: Vec<u8>,
    pub tier2: Vec<u8>,
    pub tier3: Vec<u8>,
    pub suffixes: Vec<Option<String>>,
    pub stream: Vec<u8>,
}

impl DictionaryArtifact {
    pub fn tables(&self) -> Result<TierTables> {
        TierTables::from_tiers(&self.tier1, &self.tier2, &self.tier3)
    }

    pub fn decode(&self) -> Result<BTreeSet<String>> {
        decoder::decode_parts(&self.tier1, &self.tier2, &self.tier3, &self.suffixes, &self.stream)
    }

    pub fn used_suffixes(&self) -> usize {
        self.suffixes.iter().filter(|s| s.is_some()).count()
    }

    /// Size of the binary container in bytes.
    pub fn encoded_len(&self) -> usize {
        let tiers = 3 + self.tier1.len() + self.tier2.len() + self.tier3.len();
        let suffixes: usize = 1 + self
            .suffixes
            .iter()
            .map(|s| 1 + s.as_ref().map_or(0, String::len))
            .sum::<usize>();
        MAGIC.len() + tiers + suffixes + 4 + self.stream.len()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(MAGIC)?;
        for tier in [&self.tier1, &self.tier2, &self.tier3] {
            if tier.len() > TIER_SIZE {
                return Err(LexError::InvalidArtifact(format!("tier of {} symbols", tier.len())));
            }
            w.write_u8(tier.len() as u8)?;
            w.write_all(tier)?;
        }
        if self.suffixes.len() > MAX_SUFFIX_RULES {
            return Err(LexError::InvalidArtifact(format!("{} suffix slots", self.suffixes.len())));
        }
        w.write_u8(self.suffixes.len() as u8)?;
        for slot in &self.suffixes {
            match slot {
                Some(literal) if literal.len() < usize::from(UNUSED_SLOT) => {
                    w.write_u8(literal.len() as u8)?;
                    w.write_all(literal.as_bytes())?;
                }
                Some(literal) => {
                    return Err(LexError::InvalidArtifact(format!("suffix {literal:?} too long")));
                }
                None => w.write_u8(UNUSED_SLOT)?,
            }
        }
        let stream_len = u32::try_from(self.stream.len())
            .map_err(|_| LexError::InvalidArtifact("stream exceeds 4 GiB".into()))?;
        w.write_u32::<LittleEndian>(stream_len)?;
        w.write_all(&self.stream)?;
        Ok(())
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let artifact = Self::read_from(&mut cursor)?;
        if cursor.position() as usize != data.len() {
            return Err(LexError::InvalidArtifact(format!(
                "{} trailing bytes",
                data.len() - cursor.position() as usize
            )));
        }
        Ok(artifact)
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic).map_err(truncated)?;
        if &magic != MAGIC {
            return Err(LexError::InvalidArtifact("bad magic".into()));
        }

        let mut tiers: [Vec<u8>; 3] = Default::default();
        for tier in tiers.iter_mut() {
            let len = usize::from(r.read_u8().map_err(truncated)?);
            if len > TIER_SIZE {
                return Err(LexError::InvalidArtifact(format!("tier of {len} symbols")));
            }
            *tier = read_vec(r, len)?;
        }

        let slots = usize::from(r.read_u8().map_err(truncated)?);
        if slots > MAX_SUFFIX_RULES {
            return Err(LexError::InvalidArtifact(format!("{slots} suffix slots")));
        }
        let mut suffixes = Vec::with_capacity(slots);
        for _ in 0..slots {
            let len = r.read_u8().map_err(truncated)?;
            if len == UNUSED_SLOT {
                suffixes.push(None);
                continue;
            }
            let literal = String::from_utf8(read_vec(r, usize::from(len))?)
                .map_err(|_| LexError::InvalidArtifact("suffix literal is not UTF-8".into()))?;
            suffixes.push(Some(literal));
        }

        let stream_len = r.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        let stream = read_vec(r, stream_len)?;

        let [tier1, tier2, tier3] = tiers;
        Ok(Self { tier1, tier2, tier3, suffixes, stream })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn read_vec<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(LexError::InvalidArtifact("container truncated".into()));
    }
    Ok(buf)
}

fn truncated(err: std::io::Error) -> LexError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        LexError::InvalidArtifact("container truncated".into())
    } else {
        LexError::Io(err)
    }
}
