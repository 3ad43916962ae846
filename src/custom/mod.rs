//! Pluggable scalar codecs for fields that declare a custom representation.
//!
//! Each codec is a plain value type with independent conversion entry points.
//! Imports write into `&mut self` and leave it untouched when they fail.

mod uint128;
mod uint16;
mod uuid;

pub use uint128::Uint128;
pub use uint16::Uint16;
pub use uuid::Uuid;

use crate::error::CodecError;

/// Conversion to and from a textual form.
pub trait TextCodec {
    fn export_text(&self) -> String;
    /// An empty string imports as the zero value.
    fn import_text(&mut self, text: &str) -> Result<(), CodecError>;
}

/// Conversion to and from a fixed-size little-endian byte buffer.
pub trait BinaryCodec {
    fn export_bytes(&self) -> Vec<u8>;
    /// An empty buffer imports as the zero value.
    fn import_bytes(&mut self, data: &[u8]) -> Result<(), CodecError>;
}

/// Conversion to and from a 32-bit wire word, for types narrower than it.
pub trait WordCodec {
    fn export_u32(&self) -> u32;
    fn import_u32(&mut self, word: u32) -> Result<(), CodecError>;
}

// ─── Little-endian helpers ──────────────────────────────────────────────────

#[inline]
pub fn put_le_u16(buf: &mut [u8], offset: usize, v: u16) {
    buf[offset..offset + 2].copy_from_slice(&v.to_le_bytes());
}

#[inline]
pub fn put_le_u32(buf: &mut [u8], offset: usize, v: u32) {
    buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
}

#[inline]
pub fn put_le_u64(buf: &mut [u8], offset: usize, v: u64) {
    buf[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
}

/// Writes the low word first, then the high word.
#[inline]
pub fn put_le_u128(buf: &mut [u8], offset: usize, v: [u64; 2]) {
    put_le_u64(buf, offset, v[0]);
    put_le_u64(buf, offset + 8, v[1]);
}

#[inline]
pub fn get_le_u16(buf: &[u8], offset: usize) -> Option<u16> {
    Some(u16::from_le_bytes(buf.get(offset..offset + 2)?.try_into().ok()?))
}

#[inline]
pub fn get_le_u32(buf: &[u8], offset: usize) -> Option<u32> {
    Some(u32::from_le_bytes(buf.get(offset..offset + 4)?.try_into().ok()?))
}

#[inline]
pub fn get_le_u64(buf: &[u8], offset: usize) -> Option<u64> {
    Some(u64::from_le_bytes(buf.get(offset..offset + 8)?.try_into().ok()?))
}

#[inline]
pub fn get_le_u128(buf: &[u8], offset: usize) -> Option<[u64; 2]> {
    Some([get_le_u64(buf, offset)?, get_le_u64(buf, offset + 8)?])
}

/// Reject buffers that are neither empty nor exactly `expected` bytes.
#[inline]
pub(crate) fn check_len(data: &[u8], expected: usize) -> Result<(), CodecError> {
    if data.is_empty() || data.len() == expected {
        Ok(())
    } else {
        Err(CodecError::LengthMismatch {
            expected,
            actual: data.len(),
        })
    }
}
