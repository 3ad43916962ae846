use super::handle::RecordHandle;
use crate::pool::{Pool, Word};
use crate::types::{BoxedSlot, ExtensionMap, FieldRef, RecordPtr};
use std::marker::PhantomData;
use std::ptr::NonNull;

// ════════════════════════════════════════════════════════════════════════
// Boxed-optional words
// ════════════════════════════════════════════════════════════════════════

/// View of a `Option<NonNull<T>>` field whose cells come from a [`Pool`].
pub struct Boxed<'a, T: Word> {
    slot: NonNull<BoxedSlot<T>>,
    _marker: PhantomData<&'a mut BoxedSlot<T>>,
}

pub type Word16<'a> = Boxed<'a, u16>;
pub type Word32<'a> = Boxed<'a, u32>;
pub type Word64<'a> = Boxed<'a, u64>;
pub type BoolField<'a> = Boxed<'a, bool>;

impl<'a, T: Word> Boxed<'a, T> {
    /// True when the field holds no reference (not set).
    #[inline]
    pub fn is_nil(&self) -> bool {
        // SAFETY: the slot was validated when the view was built.
        unsafe { self.slot.read() }.is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<T> {
        // SAFETY: a set slot points at a pool cell written by `set`.
        unsafe { self.slot.read().map(|cell| cell.read()) }
    }

    /// Store `value` in a fresh pool cell and point the field at it.
    ///
    /// The previously referenced cell, if any, is left to the pool.
    #[inline]
    pub fn set(&mut self, pool: &mut Pool, value: T) {
        let cell = pool.acquire::<T>();
        // SAFETY: the cell is fresh and exclusively ours; the slot is valid.
        unsafe {
            cell.write(value);
            self.slot.write(Some(cell));
        }
    }

    /// Mark the field as not set.
    #[inline]
    pub fn clear(&mut self) {
        // SAFETY: the slot was validated when the view was built.
        unsafe { self.slot.write(None) }
    }
}

// ════════════════════════════════════════════════════════════════════════
// Inline values
// ════════════════════════════════════════════════════════════════════════

/// View of a field that stores its value directly. Never absent.
pub struct Inline<'a, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

pub type RefWord16<'a> = Inline<'a, u16>;
pub type RefWord32<'a> = Inline<'a, u32>;
pub type RefWord64<'a> = Inline<'a, u64>;
pub type RefBool<'a> = Inline<'a, bool>;
pub type RefText<'a> = Inline<'a, String>;
pub type RefBytes<'a> = Inline<'a, Vec<u8>>;

impl<'a, T> Inline<'a, T> {
    #[inline]
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        // SAFETY: the pointer was validated when the view was built.
        unsafe { self.ptr.read() }
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        // SAFETY: as above; the old value is dropped in place.
        unsafe { *self.ptr.as_mut() = value }
    }

    #[inline]
    pub fn replace(&mut self, value: T) -> T {
        // SAFETY: as above.
        std::mem::replace(unsafe { self.ptr.as_mut() }, value)
    }

    #[inline]
    pub fn as_ref(&self) -> &T {
        // SAFETY: as above.
        unsafe { self.ptr.as_ref() }
    }

    #[inline]
    pub fn as_mut(&mut self) -> &mut T {
        // SAFETY: as above.
        unsafe { self.ptr.as_mut() }
    }
}

impl Inline<'_, String> {
    /// The live text, no copy.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.as_ref().as_str()
    }
}

impl Inline<'_, Vec<u8>> {
    /// The live buffer, no copy.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.as_ref().as_slice()
    }
}

// ════════════════════════════════════════════════════════════════════════
// Optional owned buffers
// ════════════════════════════════════════════════════════════════════════

/// View of an `Option<T>` field holding an owned buffer (text or bytes).
pub struct Opt<'a, T> {
    slot: NonNull<Option<T>>,
    _marker: PhantomData<&'a mut Option<T>>,
}

pub type Text<'a> = Opt<'a, String>;
pub type Bytes<'a> = Opt<'a, Vec<u8>>;

impl<'a, T> Opt<'a, T> {
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.get().is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        // SAFETY: the slot was validated when the view was built.
        unsafe { self.slot.as_ref() }.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above.
        unsafe { self.slot.as_mut() }.as_mut()
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        // SAFETY: as above; any previous value is dropped.
        unsafe { *self.slot.as_mut() = Some(value) }
    }

    #[inline]
    pub fn take(&mut self) -> Option<T> {
        // SAFETY: as above.
        unsafe { self.slot.as_mut() }.take()
    }
}

impl Opt<'_, String> {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }
}

impl Opt<'_, Vec<u8>> {
    #[inline]
    pub fn as_slice(&self) -> Option<&[u8]> {
        self.get().map(Vec::as_slice)
    }
}

// ════════════════════════════════════════════════════════════════════════
// Nested record references
// ════════════════════════════════════════════════════════════════════════

/// View of a field pointing at a separately stored nested record.
pub struct Nested<'a> {
    slot: NonNull<RecordPtr>,
    _marker: PhantomData<&'a mut RecordPtr>,
}

impl<'a> Nested<'a> {
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.get().is_none()
    }

    #[inline]
    pub fn get(&self) -> RecordPtr {
        // SAFETY: the slot was validated when the view was built.
        unsafe { self.slot.read() }
    }

    #[inline]
    pub fn set(&mut self, record: RecordPtr) {
        // SAFETY: as above.
        unsafe { self.slot.write(record) }
    }

    /// Handle to the referenced record, if any.
    ///
    /// # Safety
    ///
    /// The referenced record must be live, `extent` bytes long, and not
    /// otherwise borrowed while the handle is in use.
    #[inline]
    pub unsafe fn handle(&self, extent: usize) -> Option<RecordHandle<'a>> {
        // SAFETY: forwarded to the caller.
        self.get()
            .map(|base| unsafe { RecordHandle::from_raw(base, extent) })
    }
}

// ════════════════════════════════════════════════════════════════════════
// View constructors
// ════════════════════════════════════════════════════════════════════════

impl<'r> RecordHandle<'r> {
    /// Boxed-optional view of `field`.
    ///
    /// # Safety
    ///
    /// `field` must address an `Option<NonNull<T>>` whose cells come from a
    /// pool that outlives the record. No other view may alias it while the
    /// returned view mutates.
    #[inline]
    pub unsafe fn boxed<T: Word>(&self, field: FieldRef) -> Boxed<'_, T> {
        Boxed {
            // SAFETY: forwarded to the caller.
            slot: unsafe { self.field_ptr(field) },
            _marker: PhantomData,
        }
    }

    /// Inline view of `field`.
    ///
    /// # Safety
    ///
    /// `field` must address a valid `T`; no other view may alias it.
    #[inline]
    pub unsafe fn inline<T>(&self, field: FieldRef) -> Inline<'_, T> {
        Inline {
            // SAFETY: forwarded to the caller.
            ptr: unsafe { self.field_ptr(field) },
            _marker: PhantomData,
        }
    }

    /// Optional buffer view of `field`.
    ///
    /// # Safety
    ///
    /// `field` must address a valid `Option<T>`; no other view may alias it.
    #[inline]
    pub unsafe fn opt<T>(&self, field: FieldRef) -> Opt<'_, T> {
        Opt {
            // SAFETY: forwarded to the caller.
            slot: unsafe { self.field_ptr(field) },
            _marker: PhantomData,
        }
    }

    /// Nested record reference view of `field`.
    ///
    /// # Safety
    ///
    /// `field` must address an `Option<NonNull<u8>>`; no other view may alias it.
    #[inline]
    pub unsafe fn nested(&self, field: FieldRef) -> Nested<'_> {
        Nested {
            // SAFETY: forwarded to the caller.
            slot: unsafe { self.field_ptr(field) },
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `field` must address an [`ExtensionMap`].
    #[inline]
    pub unsafe fn ext_map(&self, field: FieldRef) -> Inline<'_, ExtensionMap> {
        // SAFETY: forwarded to the caller.
        unsafe { self.inline(field) }
    }

    // ─── Width-named shorthands ─────────────────────────────────────────────

    /// # Safety
    ///
    /// See [`RecordHandle::boxed`].
    #[inline]
    pub unsafe fn word16(&self, field: FieldRef) -> Word16<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.boxed(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::boxed`].
    #[inline]
    pub unsafe fn word32(&self, field: FieldRef) -> Word32<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.boxed(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::boxed`].
    #[inline]
    pub unsafe fn word64(&self, field: FieldRef) -> Word64<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.boxed(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::inline`].
    #[inline]
    pub unsafe fn ref_word16(&self, field: FieldRef) -> RefWord16<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.inline(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::inline`].
    #[inline]
    pub unsafe fn ref_word32(&self, field: FieldRef) -> RefWord32<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.inline(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::inline`].
    #[inline]
    pub unsafe fn ref_word64(&self, field: FieldRef) -> RefWord64<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.inline(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::opt`].
    #[inline]
    pub unsafe fn text(&self, field: FieldRef) -> Text<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.opt(field) }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::opt`].
    #[inline]
    pub unsafe fn bytes(&self, field: FieldRef) -> Bytes<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.opt(field) }
    }
}
