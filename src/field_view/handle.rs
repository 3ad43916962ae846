//! Record handles and the only place where field offsets become addresses.
//!
//! Every typed pointer into a record is produced by [`RecordHandle::field_ptr`],
//! which checks in debug builds that the field is valid, lies inside the
//! record and is aligned for the type it is read as. Release builds trust the
//! caller, the same way the rest of the layer does.

use crate::types::FieldRef;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Non-owning view of one record instance.
///
/// A handle never allocates or frees the record. It borrows the record for
/// `'r`, so the record can't move or drop while the handle (or any view
/// derived from it) is alive.
pub struct RecordHandle<'r> {
    base: NonNull<u8>,
    extent: usize,
    _marker: PhantomData<&'r mut [u8]>,
}

impl<'r> RecordHandle<'r> {
    /// Wrap a live record. The extent is the record's own size.
    #[inline]
    pub fn new<T>(record: &'r mut T) -> Self {
        Self {
            base: NonNull::from(record).cast(),
            extent: size_of::<T>(),
            _marker: PhantomData,
        }
    }

    /// Wrap engine-managed record storage.
    ///
    /// # Safety
    ///
    /// `base` must point at `extent` bytes of a live record that stays in
    /// place, and is not accessed through any other path, for `'r`.
    #[inline]
    pub unsafe fn from_raw(base: NonNull<u8>, extent: usize) -> Self {
        Self {
            base,
            extent,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    /// Size in bytes of the record behind this handle.
    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Shorter-lived handle to the same record.
    #[inline]
    pub fn reborrow(&mut self) -> RecordHandle<'_> {
        RecordHandle {
            base: self.base,
            extent: self.extent,
            _marker: PhantomData,
        }
    }

    /// Address of `field`: base + offset. Computing it is always safe;
    /// dereferencing it is not.
    #[inline]
    pub fn field_addr(&self, field: FieldRef) -> *mut u8 {
        self.base.as_ptr().wrapping_add(field.offset())
    }

    /// Typed pointer to `field`.
    ///
    /// # Safety
    ///
    /// `field` must be valid for this record's layout and address a `T`.
    #[inline]
    pub(crate) unsafe fn field_ptr<T>(&self, field: FieldRef) -> NonNull<T> {
        debug_assert!(field.is_valid(), "dereferencing an invalid FieldRef");
        debug_assert!(
            field
                .offset()
                .checked_add(size_of::<T>())
                .is_some_and(|end| end <= self.extent),
            "field at offset {} ({} bytes) past record extent {}",
            field.offset(),
            size_of::<T>(),
            self.extent
        );
        // SAFETY: caller guarantees the offset is inside the record.
        let ptr = unsafe { self.base.add(field.offset()) }.cast::<T>();
        debug_assert!(
            ptr.as_ptr().is_aligned(),
            "field at offset {} misaligned for {}",
            field.offset(),
            std::any::type_name::<T>()
        );
        ptr
    }

    /// Handle to a record embedded by value at `field`.
    ///
    /// # Safety
    ///
    /// `field` must address an inline record of `extent` bytes.
    #[inline]
    pub unsafe fn sub_record(&self, field: FieldRef, extent: usize) -> RecordHandle<'_> {
        debug_assert!(field.is_valid(), "dereferencing an invalid FieldRef");
        debug_assert!(
            field
                .offset()
                .checked_add(extent)
                .is_some_and(|end| end <= self.extent),
            "embedded record past record extent"
        );
        // SAFETY: caller guarantees `extent` bytes at the offset belong to the record.
        unsafe { RecordHandle::from_raw(self.base.add(field.offset()), extent) }
    }

    /// Handle `bytes` past this one, e.g. the next element of an inline array.
    ///
    /// # Safety
    ///
    /// `bytes..bytes + extent` must lie inside this record and hold a record
    /// of `extent` bytes.
    #[inline]
    pub unsafe fn offset(&self, bytes: usize, extent: usize) -> RecordHandle<'_> {
        debug_assert!(
            bytes
                .checked_add(extent)
                .is_some_and(|end| end <= self.extent),
            "handle at offset {bytes} ({extent} bytes) past record extent {}",
            self.extent
        );
        // SAFETY: forwarded to the caller.
        unsafe { RecordHandle::from_raw(self.base.add(bytes), extent) }
    }

    /// The whole record as a `T`.
    ///
    /// # Safety
    ///
    /// The record must be a valid, aligned `T`.
    #[inline]
    pub unsafe fn record<T>(&self) -> &T {
        debug_assert!(size_of::<T>() <= self.extent);
        // SAFETY: forwarded to the caller.
        unsafe { self.base.cast::<T>().as_ref() }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::record`]; no other reference into the record may be live.
    #[inline]
    pub unsafe fn record_mut<T>(&mut self) -> &mut T {
        debug_assert!(size_of::<T>() <= self.extent);
        // SAFETY: forwarded to the caller.
        unsafe { self.base.cast::<T>().as_mut() }
    }
}

impl std::fmt::Debug for RecordHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordHandle")
            .field("base", &self.base)
            .field("extent", &self.extent)
            .finish()
    }
}
