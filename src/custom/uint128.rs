use super::{BinaryCodec, TextCodec, check_len, get_le_u128, put_le_u128};
use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// 128-bit value stored as `[low, high]` 64-bit words.
///
/// Text form is `"<low>-<high>"` in decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Uint128(pub [u64; 2]);

impl Uint128 {
    pub const ZERO: Uint128 = Uint128([0, 0]);

    pub fn new(low: u64, high: u64) -> Self {
        Self([low, high])
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0[0], self.0[1])
    }
}

impl FromStr for Uint128 {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(CodecError::SegmentCount {
                expected: 2,
                actual: parts.len(),
            });
        }
        Ok(Self([parts[0].parse()?, parts[1].parse()?]))
    }
}

impl TextCodec for Uint128 {
    fn export_text(&self) -> String {
        self.to_string()
    }

    fn import_text(&mut self, text: &str) -> Result<(), CodecError> {
        *self = if text.is_empty() {
            Self::ZERO
        } else {
            text.parse()?
        };
        Ok(())
    }
}

impl BinaryCodec for Uint128 {
    fn export_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 16];
        put_le_u128(&mut buf, 0, self.0);
        buf
    }

    fn import_bytes(&mut self, data: &[u8]) -> Result<(), CodecError> {
        check_len(data, 16)?;
        *self = match get_le_u128(data, 0) {
            Some(words) => Self(words),
            None => Self::ZERO,
        };
        Ok(())
    }
}
