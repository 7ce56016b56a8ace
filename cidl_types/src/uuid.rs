use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/* Byte offsets of the dashes in `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` */
const DASH_POSITIONS: [usize; 4] = [8, 13, 18, 23];

#[derive(Debug, Error, PartialEq)]
pub enum UuidParseError {
    #[error("dashes must separate 8-4-4-4-12 digit groups in '{0}'")]
    Format(String),
    #[error("invalid hexadecimal UUID: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// 16-byte interface/library identifier, stored in declaration byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapeUuid {
    pub data: [u8; 16],
}

impl CapeUuid {
    pub const fn from_bytes(data: [u8; 16]) -> Self {
        Self { data }
    }
}

impl FromStr for CapeUuid {
    type Err = UuidParseError;

    /// Accepts `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` or 32 bare digits,
    /// optionally wrapped in braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let text = text
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(text);

        let digits: String = if text.contains('-') {
            let bytes = text.as_bytes();
            if bytes.len() != 36 || DASH_POSITIONS.iter().any(|i| bytes[*i] != b'-') {
                return Err(UuidParseError::Format(s.to_string()));
            }
            text.split('-').collect()
        } else {
            text.to_string()
        };

        let mut data = [0u8; 16];
        hex::decode_to_slice(&digits, &mut data)?;
        Ok(Self { data })
    }
}

impl fmt::Display for CapeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = hex::encode(self.data);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &digits[0..8],
            &digits[8..12],
            &digits[12..16],
            &digits[16..20],
            &digits[20..]
        )
    }
}

impl Serialize for CapeUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CapeUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
