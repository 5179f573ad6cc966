//! Canonical 20-byte addresses and their checksummed text form.
//!
//! The stored and encoded representation is always the raw 20 bytes. Hex and
//! EIP-55 checksummed strings are accepted at the boundary and normalized
//! before they reach a record; the checksummed form is display-only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::Hash32;
use crate::error::{CollationError, Result};

/// A canonical 20-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Byte width of a canonical address.
    pub const LEN: usize = 20;

    /// Create from a 20-byte array (canonical form).
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Normalize any accepted address form to the canonical 20 bytes.
    ///
    /// Exactly 20 input bytes are taken verbatim. Anything else must be UTF-8
    /// hex text, optionally `0x`-prefixed; mixed-case text must carry a valid
    /// checksum.
    pub fn normalize(input: impl AsRef<[u8]>) -> Result<Self> {
        let input = input.as_ref();
        if let Ok(raw) = <[u8; 20]>::try_from(input) {
            return Ok(Self(raw));
        }
        let text = std::str::from_utf8(input).map_err(|_| {
            CollationError::InvalidAddress(format!(
                "{} raw bytes do not form a 20-byte address",
                input.len()
            ))
        })?;
        text.parse()
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 mixed-case checksummed form, `0x`-prefixed.
    pub fn to_checksum(&self) -> String {
        let lower = self.to_hex();
        let digest = Hash32::keccak(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = digest.0[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = CollationError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != 2 * Self::LEN {
            return Err(CollationError::InvalidAddress(format!(
                "expected {} hex digits, got {}",
                2 * Self::LEN,
                digits.len()
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| CollationError::InvalidAddress(e.to_string()))?;
        let address = Self(bytes);

        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && address.to_checksum()[2..] != *digits {
            return Err(CollationError::InvalidAddress(format!(
                "checksum mismatch for {}",
                s
            )));
        }

        Ok(address)
    }
}

impl TryFrom<String> for Address {
    type Error = CollationError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_checksum()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}
