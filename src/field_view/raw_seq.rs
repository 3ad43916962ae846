use super::handle::RecordHandle;
use super::scalar_op::Inline;
use crate::types::FieldRef;
use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};
use tracing::trace;

// ─── RecordLayout ───────────────────────────────────────────────────────────

/// Runtime description of a record type: its size and alignment, how to
/// build a default instance in place, and how to drop one.
#[derive(Clone, Copy)]
pub struct RecordLayout {
    layout: Layout,
    /// `None` means the default record is all-zero bytes.
    init: Option<unsafe fn(*mut u8)>,
    /// `None` means the record owns nothing.
    drop: Option<unsafe fn(*mut u8)>,
}

unsafe fn init_in_place<T: Default>(ptr: *mut u8) {
    // SAFETY: caller passes aligned, writable storage for a `T`.
    unsafe { ptr.cast::<T>().write(T::default()) }
}

unsafe fn drop_in_place<T>(ptr: *mut u8) {
    // SAFETY: caller passes an initialised `T` that is dropped once.
    unsafe { ptr::drop_in_place(ptr.cast::<T>()) }
}

impl RecordLayout {
    pub fn of<T: Default>() -> Self {
        Self {
            layout: Layout::new::<T>(),
            init: Some(init_in_place::<T> as unsafe fn(*mut u8)),
            drop: std::mem::needs_drop::<T>()
                .then_some(drop_in_place::<T> as unsafe fn(*mut u8)),
        }
    }

    /// Layout of a plain record whose default is all-zero bytes.
    ///
    /// # Safety
    ///
    /// All-zero bytes must be a valid record, and the record must not own
    /// anything that needs dropping.
    pub unsafe fn zeroed(layout: Layout) -> Self {
        Self {
            layout: layout.pad_to_align(),
            init: None,
            drop: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub fn align(&self) -> usize {
        self.layout.align()
    }
}

impl std::fmt::Debug for RecordLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordLayout")
            .field("size", &self.size())
            .field("align", &self.align())
            .field("needs_drop", &self.drop.is_some())
            .finish()
    }
}

// ─── RawSeq ─────────────────────────────────────────────────────────────────
//
//  ┌──────────────────────────────────────────────┐
//  │ ptr ──► [ elem 0 | elem 1 | ... | elem len-1 | unspecified ... ]
//  │          └──────── len * size ─────────────┘
//  │          └──────────────── cap * size ────────────────────────┘
//  └──────────────────────────────────────────────┘
//
//  Invariant: len <= cap, elements [0, len) are initialised.

/// Growable array of inline records whose type is only known at runtime.
pub struct RawSeq {
    ptr: NonNull<u8>,
    len: usize,
    cap: usize,
    elem: RecordLayout,
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("RawSeq capacity overflow")
}

impl RawSeq {
    pub fn new(elem: RecordLayout) -> Self {
        let ptr = NonNull::new(ptr::without_provenance_mut::<u8>(elem.align()))
            .unwrap_or(NonNull::dangling());
        Self {
            ptr,
            len: 0,
            cap: if elem.size() == 0 { usize::MAX } else { 0 },
            elem,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn elem_layout(&self) -> &RecordLayout {
        &self.elem
    }

    #[inline]
    fn elem_ptr(&self, i: usize) -> *mut u8 {
        self.ptr.as_ptr().wrapping_add(i * self.elem.size())
    }

    fn grow(&mut self) {
        let size = self.elem.size();
        let new_cap = if self.cap == 0 {
            4
        } else {
            self.cap.checked_mul(2).unwrap_or_else(|| capacity_overflow())
        };
        let new_bytes = size
            .checked_mul(new_cap)
            .unwrap_or_else(|| capacity_overflow());
        let new_layout = Layout::from_size_align(new_bytes, self.elem.align())
            .unwrap_or_else(|_| capacity_overflow());

        let new_ptr = if self.cap == 0 {
            // SAFETY: `new_layout` has a non-zero size.
            unsafe { alloc::alloc(new_layout) }
        } else {
            let old_layout = Layout::from_size_align(size * self.cap, self.elem.align())
                .unwrap_or_else(|_| capacity_overflow());
            // SAFETY: `ptr` was allocated with `old_layout`; realloc moves the
            // existing element bytes into the new block.
            unsafe { alloc::realloc(self.ptr.as_ptr(), old_layout, new_bytes) }
        };
        self.ptr =
            NonNull::new(new_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout));
        trace!(
            elem_size = size,
            old_cap = self.cap,
            new_cap,
            "raw sequence grown"
        );
        self.cap = new_cap;
    }

    /// Append a default-initialised record and return a handle to it.
    pub fn append_record(&mut self) -> RecordHandle<'_> {
        if self.len == self.cap {
            self.grow();
        }
        let slot = self.elem_ptr(self.len);
        // SAFETY: `slot` is inside the allocation (len < cap) and suitably aligned.
        unsafe {
            match self.elem.init {
                Some(init) => init(slot),
                None => ptr::write_bytes(slot, 0, self.elem.size()),
            }
        }
        self.len += 1;
        // SAFETY: `slot` is non-null and now holds an initialised record.
        unsafe { RecordHandle::from_raw(NonNull::new_unchecked(slot), self.elem.size()) }
    }

    /// Handle to element `i`. Panics when `i >= len`.
    pub fn index(&mut self, i: usize) -> RecordHandle<'_> {
        assert!(
            i < self.len,
            "index {i} out of range for RawSeq of length {}",
            self.len
        );
        let elem = self.elem_ptr(i);
        // SAFETY: `i < len`, so the element is initialised and in bounds.
        unsafe { RecordHandle::from_raw(NonNull::new_unchecked(elem), self.elem.size()) }
    }

    pub fn get(&mut self, i: usize) -> Option<RecordHandle<'_>> {
        if i < self.len {
            Some(self.index(i))
        } else {
            None
        }
    }

    /// The elements as a typed slice.
    ///
    /// # Safety
    ///
    /// The element layout must be the layout of `T`.
    pub unsafe fn as_slice<T>(&self) -> &[T] {
        debug_assert_eq!(size_of::<T>(), self.elem.size());
        debug_assert_eq!(align_of::<T>(), self.elem.align());
        // SAFETY: `[0, len)` are initialised `T`s per the caller.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<T>(), self.len) }
    }

    /// # Safety
    ///
    /// See [`RawSeq::as_slice`].
    pub unsafe fn as_mut_slice<T>(&mut self) -> &mut [T] {
        debug_assert_eq!(size_of::<T>(), self.elem.size());
        debug_assert_eq!(align_of::<T>(), self.elem.align());
        // SAFETY: as above, with exclusive access through `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<T>(), self.len) }
    }

    /// Drop every element, keeping the allocation.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        if let Some(drop_fn) = self.elem.drop {
            for i in 0..len {
                // SAFETY: each of the old `[0, len)` elements is dropped once.
                unsafe { drop_fn(self.elem_ptr(i)) };
            }
        }
    }
}

impl Drop for RawSeq {
    fn drop(&mut self) {
        self.clear();
        let bytes = self.elem.size() * self.cap;
        if self.elem.size() != 0 && self.cap != 0 {
            // SAFETY: allocated in `grow` with exactly this size and align.
            unsafe {
                alloc::dealloc(
                    self.ptr.as_ptr(),
                    Layout::from_size_align_unchecked(bytes, self.elem.align()),
                )
            };
        }
    }
}

impl std::fmt::Debug for RawSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSeq")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("elem", &self.elem)
            .finish()
    }
}

impl<'r> RecordHandle<'r> {
    /// View of a [`RawSeq`] field.
    ///
    /// # Safety
    ///
    /// `field` must address a valid `RawSeq`; no other view may alias it.
    #[inline]
    pub unsafe fn raw_seq(&self, field: FieldRef) -> Inline<'_, RawSeq> {
        // SAFETY: forwarded to the caller.
        unsafe { self.inline(field) }
    }
}
