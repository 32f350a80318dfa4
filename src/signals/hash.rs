//! Perceptual image hashes and their Hamming distance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// A fixed-length bit signature of a rendered slide.
///
/// On the wire this is the hex string produced by common perceptual hash
/// tools (a 64-bit pHash prints as 16 hex digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PerceptualHash {
    bytes: Box<[u8]>,
}

impl PerceptualHash {
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_bytes(value.to_be_bytes().to_vec())
    }

    /// Signature length in bits.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Number of differing bits (XOR + popcount).
    pub fn distance(&self, other: &Self) -> Result<u32, MatchError> {
        if self.bytes.len() != other.bytes.len() {
            return Err(MatchError::HashLengthMismatch {
                left: self.bit_len(),
                right: other.bit_len(),
            });
        }
        Ok(self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }
}

/// Failure to parse a hash from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("perceptual hash is empty")]
    Empty,

    #[error("perceptual hash must have an even number of hex digits, got {0}")]
    OddLength(usize),

    #[error("invalid hex digit in perceptual hash '{0}'")]
    InvalidDigit(String),
}

impl FromStr for PerceptualHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() {
            return Err(HashParseError::Empty);
        }
        let bytes = hex::decode(digits).map_err(|err| match err {
            hex::FromHexError::OddLength => HashParseError::OddLength(digits.len()),
            _ => HashParseError::InvalidDigit(digits.to_string()),
        })?;

        Ok(Self::from_bytes(bytes))
    }
}

impl TryFrom<String> for PerceptualHash {
    type Error = HashParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PerceptualHash> for String {
    fn from(hash: PerceptualHash) -> Self {
        hash.to_string()
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.bytes))
    }
}
