use super::{BinaryCodec, TextCodec, WordCodec, check_len, get_le_u16, put_le_u16};
use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// 16-bit unsigned value carried on the wire as a 32-bit word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint16(pub u16);

const MAX: u64 = u16::MAX as u64;

impl fmt::Display for Uint16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uint16 {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wide: u64 = s.parse()?;
        u16::try_from(wide)
            .map(Self)
            .map_err(|_| CodecError::OutOfRange { value: wide, max: MAX })
    }
}

impl TextCodec for Uint16 {
    fn export_text(&self) -> String {
        self.to_string()
    }

    fn import_text(&mut self, text: &str) -> Result<(), CodecError> {
        *self = if text.is_empty() {
            Self(0)
        } else {
            text.parse()?
        };
        Ok(())
    }
}

impl BinaryCodec for Uint16 {
    fn export_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 2];
        put_le_u16(&mut buf, 0, self.0);
        buf
    }

    fn import_bytes(&mut self, data: &[u8]) -> Result<(), CodecError> {
        check_len(data, 2)?;
        *self = Self(get_le_u16(data, 0).unwrap_or(0));
        Ok(())
    }
}

impl WordCodec for Uint16 {
    fn export_u32(&self) -> u32 {
        u32::from(self.0)
    }

    fn import_u32(&mut self, word: u32) -> Result<(), CodecError> {
        let narrow = u16::try_from(word).map_err(|_| CodecError::OutOfRange {
            value: u64::from(word),
            max: MAX,
        })?;
        *self = Self(narrow);
        Ok(())
    }
}
