use super::{BinaryCodec, TextCodec, check_len};
use crate::error::CodecError;
use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

const UUID_LEN: usize = 16;
const TEXT_LEN: usize = 36;
const DASHES: [usize; 4] = [8, 13, 18, 23];

/// Identifier of either zero bytes (unset) or exactly 16 bytes.
///
/// Text form is `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`; imports also accept
/// the braced `{...}` form and upper-case hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uuid(ArrayVec<u8, UUID_LEN>);

impl Uuid {
    pub fn from_bytes(bytes: [u8; UUID_LEN]) -> Self {
        Self(ArrayVec::from(bytes))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Version nibble, `None` for an empty uuid.
    pub fn version(&self) -> Option<u8> {
        self.0.get(6).map(|b| b >> 4)
    }
}

fn invalid(text: &str) -> CodecError {
    CodecError::InvalidUuid(text.to_owned())
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<empty uuid>");
        }
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Uuid {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = if s.len() == TEXT_LEN + 2 {
            s.strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .ok_or_else(|| invalid(s))?
        } else {
            s
        };
        if body.len() != TEXT_LEN {
            return Err(invalid(s));
        }

        let mut bytes = [0u8; UUID_LEN];
        let mut nibble = 0usize;
        for (i, c) in body.bytes().enumerate() {
            if DASHES.contains(&i) {
                if c != b'-' {
                    return Err(invalid(s));
                }
                continue;
            }
            let v = (c as char).to_digit(16).ok_or_else(|| invalid(s))? as u8;
            if nibble % 2 == 0 {
                bytes[nibble / 2] = v << 4;
            } else {
                bytes[nibble / 2] |= v;
            }
            nibble += 1;
        }

        let uuid = Self::from_bytes(bytes);
        match uuid.version() {
            Some(1..=5) => Ok(uuid),
            _ => Err(invalid(s)),
        }
    }
}

impl TextCodec for Uuid {
    fn export_text(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            self.to_string()
        }
    }

    fn import_text(&mut self, text: &str) -> Result<(), CodecError> {
        *self = if text.is_empty() {
            Self::default()
        } else {
            text.parse()?
        };
        Ok(())
    }
}

impl BinaryCodec for Uuid {
    fn export_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn import_bytes(&mut self, data: &[u8]) -> Result<(), CodecError> {
        check_len(data, UUID_LEN)?;
        let mut bytes = ArrayVec::new();
        // Length checked above, so this can't overflow.
        bytes
            .try_extend_from_slice(data)
            .map_err(|_| CodecError::LengthMismatch {
                expected: UUID_LEN,
                actual: data.len(),
            })?;
        *self = Self(bytes);
        Ok(())
    }
}
