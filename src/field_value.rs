use crate::error::FieldError;
use crate::field_view::RecordHandle;
use crate::pool::Pool;
use crate::types::{FieldKind, FieldRef, Repr};
use std::ptr::NonNull;

// ─── Value ──────────────────────────────────────────────────────────────────

/// A field's value, borrowed from the record where possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    U16(u16),
    U32(u32),
    U64(u64),
    Bool(bool),
    Bytes(&'a [u8]),
    Text(&'a str),
    Record(NonNull<u8>),
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::U16(_) => FieldKind::U16,
            Value::U32(_) => FieldKind::U32,
            Value::U64(_) => FieldKind::U64,
            Value::Bool(_) => FieldKind::Bool,
            Value::Bytes(_) => FieldKind::Bytes,
            Value::Text(_) => FieldKind::Text,
            Value::Record(_) => FieldKind::Record,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U16(v) => Some(u64::from(*v)),
            Value::U32(v) => Some(u64::from(*v)),
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<NonNull<u8>> {
        match self {
            Value::Record(p) => Some(*p),
            _ => None,
        }
    }
}

// ─── FieldDesc ──────────────────────────────────────────────────────────────

/// A field resolved once from layout metadata: where it is, what it holds
/// and how it holds it. Cache it per layout and reuse it for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    field: FieldRef,
    kind: FieldKind,
    repr: Repr,
}

impl FieldDesc {
    pub const fn new(field: FieldRef, kind: FieldKind, repr: Repr) -> Self {
        Self { field, kind, repr }
    }

    #[inline]
    pub fn field(&self) -> FieldRef {
        self.field
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[inline]
    pub fn repr(&self) -> Repr {
        self.repr
    }
}

// ════════════════════════════════════════════════════════════════════════
// Dynamic access
// ════════════════════════════════════════════════════════════════════════
//
//  Storage expected per (kind, repr):
//
//    U16/U32/U64/Bool  Boxed → Option<NonNull<T>>   Inline → T
//    Bytes             Boxed → Option<Vec<u8>>      Inline → Vec<u8>
//    Text              Boxed → Option<String>       Inline → String
//    Record            Boxed → Option<NonNull<u8>>  Inline → embedded record

impl<'r> RecordHandle<'r> {
    /// Read the field described by `desc`. `None` means a boxed field that
    /// is not set (or a nil record reference).
    ///
    /// # Safety
    ///
    /// `desc` must describe this record's layout, with storage as listed above.
    pub unsafe fn get_value(&self, desc: &FieldDesc) -> Option<Value<'_>> {
        let f = desc.field;
        // SAFETY: storage types follow from `desc`, which the caller vouches for.
        unsafe {
            match (desc.kind, desc.repr) {
                (FieldKind::U16, Repr::Boxed) => self.word16(f).get().map(Value::U16),
                (FieldKind::U32, Repr::Boxed) => self.word32(f).get().map(Value::U32),
                (FieldKind::U64, Repr::Boxed) => self.word64(f).get().map(Value::U64),
                (FieldKind::Bool, Repr::Boxed) => self.boxed::<bool>(f).get().map(Value::Bool),
                (FieldKind::U16, Repr::Inline) => Some(Value::U16(self.ref_word16(f).get())),
                (FieldKind::U32, Repr::Inline) => Some(Value::U32(self.ref_word32(f).get())),
                (FieldKind::U64, Repr::Inline) => Some(Value::U64(self.ref_word64(f).get())),
                (FieldKind::Bool, Repr::Inline) => Some(Value::Bool(self.inline::<bool>(f).get())),
                (FieldKind::Bytes, Repr::Boxed) => {
                    self.field_ptr::<Option<Vec<u8>>>(f).as_ref().as_deref().map(Value::Bytes)
                }
                (FieldKind::Bytes, Repr::Inline) => {
                    Some(Value::Bytes(self.field_ptr::<Vec<u8>>(f).as_ref().as_slice()))
                }
                (FieldKind::Text, Repr::Boxed) => {
                    self.field_ptr::<Option<String>>(f).as_ref().as_deref().map(Value::Text)
                }
                (FieldKind::Text, Repr::Inline) => {
                    Some(Value::Text(self.field_ptr::<String>(f).as_ref().as_str()))
                }
                (FieldKind::Record, Repr::Boxed) => self.nested(f).get().map(Value::Record),
                (FieldKind::Record, Repr::Inline) => {
                    Some(Value::Record(self.field_ptr::<u8>(f)))
                }
            }
        }
    }

    /// Write `value` into the field described by `desc`. Boxed words take a
    /// fresh cell from `pool`.
    ///
    /// Takes the handle mutably, so no [`Value`] borrowed from this record
    /// can still be alive. Writing a field's own contents back into it goes
    /// through an owned copy first.
    ///
    /// # Safety
    ///
    /// Same contract as [`RecordHandle::get_value`]. `value` must not borrow
    /// from this record through another handle.
    pub unsafe fn set_value(
        &mut self,
        desc: &FieldDesc,
        pool: &mut Pool,
        value: Value<'_>,
    ) -> Result<(), FieldError> {
        if value.kind() != desc.kind {
            return Err(FieldError::TypeMismatch {
                expected: desc.kind.tag(),
                actual: value.kind().tag(),
            });
        }
        let f = desc.field;
        // SAFETY: storage types follow from `desc`, which the caller vouches for.
        unsafe {
            match (value, desc.repr) {
                (Value::U16(v), Repr::Boxed) => self.word16(f).set(pool, v),
                (Value::U32(v), Repr::Boxed) => self.word32(f).set(pool, v),
                (Value::U64(v), Repr::Boxed) => self.word64(f).set(pool, v),
                (Value::Bool(v), Repr::Boxed) => self.boxed::<bool>(f).set(pool, v),
                (Value::U16(v), Repr::Inline) => self.ref_word16(f).set(v),
                (Value::U32(v), Repr::Inline) => self.ref_word32(f).set(v),
                (Value::U64(v), Repr::Inline) => self.ref_word64(f).set(v),
                (Value::Bool(v), Repr::Inline) => self.inline::<bool>(f).set(v),
                (Value::Bytes(b), Repr::Boxed) => {
                    let mut view = self.bytes(f);
                    match view.get_mut() {
                        Some(buf) => overwrite(buf, b),
                        None => view.set(b.to_vec()),
                    }
                }
                (Value::Bytes(b), Repr::Inline) => {
                    overwrite(self.inline::<Vec<u8>>(f).as_mut(), b)
                }
                (Value::Text(s), Repr::Boxed) => {
                    let mut view = self.text(f);
                    match view.get_mut() {
                        Some(text) => {
                            text.clear();
                            text.push_str(s);
                        }
                        None => view.set(s.to_owned()),
                    }
                }
                (Value::Text(s), Repr::Inline) => {
                    let mut view = self.inline::<String>(f);
                    let text = view.as_mut();
                    text.clear();
                    text.push_str(s);
                }
                (Value::Record(p), Repr::Boxed) => self.nested(f).set(Some(p)),
                (Value::Record(_), Repr::Inline) => return Err(FieldError::InlineRecord),
            }
        }
        Ok(())
    }

    /// True when a boxed field is not set. Inline fields are always present.
    ///
    /// # Safety
    ///
    /// Same contract as [`RecordHandle::get_value`].
    pub unsafe fn is_unset(&self, desc: &FieldDesc) -> bool {
        if desc.repr == Repr::Inline {
            return false;
        }
        let f = desc.field;
        // SAFETY: as above.
        unsafe {
            match desc.kind {
                FieldKind::U16 => self.word16(f).is_nil(),
                FieldKind::U32 => self.word32(f).is_nil(),
                FieldKind::U64 => self.word64(f).is_nil(),
                FieldKind::Bool => self.boxed::<bool>(f).is_nil(),
                FieldKind::Bytes => self.bytes(f).is_nil(),
                FieldKind::Text => self.text(f).is_nil(),
                FieldKind::Record => self.nested(f).is_nil(),
            }
        }
    }
}

#[inline]
fn overwrite(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.clear();
    buf.extend_from_slice(bytes);
}
