// ─── Error ──────────────────────────────────────────────────────────────────
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised by the tagged-value layer on top of the raw field views.
///
/// Raw view misuse (wrong offset, stale handle, out-of-range index) is a
/// caller contract and never shows up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: u8, actual: u8 },
    #[error("Embedded records can't be overwritten through a value")]
    InlineRecord,
}

/// Errors returned by the custom scalar codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Wrong segment count: expected {expected}, got {actual}")]
    SegmentCount { expected: usize, actual: usize },
    #[error("Invalid integer: {0}")]
    InvalidInt(#[from] ParseIntError),
    #[error("Value {value} out of range (max {max})")]
    OutOfRange { value: u64, max: u64 },
    #[error("Invalid uuid: {0}")]
    InvalidUuid(String),
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
