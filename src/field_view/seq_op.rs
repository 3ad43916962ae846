use super::handle::RecordHandle;
use crate::types::FieldRef;
use std::marker::PhantomData;
use std::ptr::NonNull;

// ─── Seq ────────────────────────────────────────────────────────────────────

/// View of a repeated field stored as `Vec<T>`.
///
/// Growth is geometric (whatever `Vec` does); length and element order are
/// exactly the append history.
pub struct Seq<'a, T> {
    vec: NonNull<Vec<T>>,
    _marker: PhantomData<&'a mut Vec<T>>,
}

pub type ByteSeq<'a> = Seq<'a, u8>;
pub type BoolSeq<'a> = Seq<'a, bool>;
pub type Word16Seq<'a> = Seq<'a, u16>;
pub type Word32Seq<'a> = Seq<'a, u32>;
pub type Word64Seq<'a> = Seq<'a, u64>;
pub type TextSeq<'a> = Seq<'a, String>;
pub type BytesSeq<'a> = Seq<'a, Vec<u8>>;
/// Repeated nested records held by reference. Owns the slots only.
pub type RecordRefs<'a> = Seq<'a, NonNull<u8>>;

impl<'a, T> Seq<'a, T> {
    #[inline]
    fn vec(&self) -> &Vec<T> {
        // SAFETY: the pointer was validated when the view was built.
        unsafe { self.vec.as_ref() }
    }

    #[inline]
    fn vec_mut(&mut self) -> &mut Vec<T> {
        // SAFETY: as above.
        unsafe { self.vec.as_mut() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vec().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec().is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.vec().capacity()
    }

    /// Element `i`. Panics when `i >= len`.
    #[inline]
    pub fn index(&self, i: usize) -> &T {
        &self.vec()[i]
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.vec().get(i)
    }

    #[inline]
    pub fn append(&mut self, value: T) {
        self.vec_mut().push(value);
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.vec_mut().truncate(len);
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.vec().as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.vec_mut().as_mut_slice()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec().iter()
    }
}

impl RecordRefs<'_> {
    /// Handle to the `i`-th referenced record.
    ///
    /// # Safety
    ///
    /// The referenced record must be live, `extent` bytes long and not
    /// otherwise borrowed while the handle is in use.
    #[inline]
    pub unsafe fn record(&self, i: usize, extent: usize) -> RecordHandle<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { RecordHandle::from_raw(*self.index(i), extent) }
    }
}

impl<'r> RecordHandle<'r> {
    /// Sequence view of `field`.
    ///
    /// # Safety
    ///
    /// `field` must address a valid `Vec<T>`; no other view may alias it.
    #[inline]
    pub unsafe fn seq<T>(&self, field: FieldRef) -> Seq<'_, T> {
        Seq {
            // SAFETY: forwarded to the caller.
            vec: unsafe { self.field_ptr(field) },
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// See [`RecordHandle::seq`]; `field` must be a `Vec<NonNull<u8>>`.
    #[inline]
    pub unsafe fn record_refs(&self, field: FieldRef) -> RecordRefs<'_> {
        // SAFETY: forwarded to the caller.
        unsafe { self.seq(field) }
    }
}
