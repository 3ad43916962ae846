use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::ptr::NonNull;

pub type FastMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;

// ─── Type Tags ──────────────────────────────────────────────────────────────
pub const TAG_U16: u8 = 1;
pub const TAG_U32: u8 = 2;
pub const TAG_U64: u8 = 3;
pub const TAG_BOOL: u8 = 4;
pub const TAG_BYTES: u8 = 5;
pub const TAG_TEXT: u8 = 6;
pub const TAG_RECORD: u8 = 7;

// ─── Field Storage ──────────────────────────────────────────────────────────
//
//  What a record field must be declared as for each view:
//
//  ┌─────────────────────┬──────────────────────────────┐
//  │ boxed-optional word │ Option<NonNull<T>>  (pooled) │
//  │ inline word         │ T                            │
//  │ optional buffer     │ Option<String> / Option<Vec> │
//  │ inline buffer       │ String / Vec<u8>             │
//  │ nested record ref   │ Option<NonNull<u8>>          │
//  │ repeated field      │ Vec<T>                       │
//  │ repeated records    │ RawSeq                       │
//  │ extensions          │ ExtensionMap                 │
//  └─────────────────────┴──────────────────────────────┘

/// Storage of a boxed-optional scalar. `None` is "not set", never a zero.
pub type BoxedSlot<T> = Option<NonNull<T>>;

/// Storage of a reference to a nested record.
pub type RecordPtr = Option<NonNull<u8>>;

/// Encoded bytes of one extension field, kept opaque until the wire layer asks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
    pub enc: Vec<u8>,
}

impl Extension {
    pub fn new(enc: Vec<u8>) -> Self {
        Self { enc }
    }

    #[inline]
    pub fn encoded(&self) -> &[u8] {
        &self.enc
    }
}

pub type ExtensionMap = FastMap<i32, Extension>;

// ─── FieldRef ───────────────────────────────────────────────────────────────

/// Byte offset of one field inside a record layout.
///
/// Resolved once from layout metadata and reusable across every record of
/// that layout. All bits set means "no such field".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef(usize);

impl FieldRef {
    pub const INVALID: FieldRef = FieldRef(usize::MAX);

    #[inline]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != usize::MAX
    }
}

impl Default for FieldRef {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Resolve a [`FieldRef`] for a field of a statically known record type.
#[macro_export]
macro_rules! field_ref {
    ($record:ty, $field:ident) => {
        $crate::types::FieldRef::new(::core::mem::offset_of!($record, $field))
    };
}

// ─── FieldKind / Repr ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldKind {
    U16 = TAG_U16,
    U32 = TAG_U32,
    U64 = TAG_U64,
    Bool = TAG_BOOL,
    Bytes = TAG_BYTES,
    Text = TAG_TEXT,
    Record = TAG_RECORD,
}

impl FieldKind {
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            TAG_U16 => FieldKind::U16,
            TAG_U32 => FieldKind::U32,
            TAG_U64 => FieldKind::U64,
            TAG_BOOL => FieldKind::Bool,
            TAG_BYTES => FieldKind::Bytes,
            TAG_TEXT => FieldKind::Text,
            TAG_RECORD => FieldKind::Record,
            _ => return None,
        })
    }
}

/// How a field stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    /// Reference to separately allocated storage; absence means "not set".
    Boxed,
    /// Value lives in the record itself and is always present.
    Inline,
}
