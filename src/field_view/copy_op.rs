use super::handle::RecordHandle;
use std::ptr;

/// Copy the first `size` bytes of `src` over `dst`.
///
/// Used to clone or merge records of identical layout. Copying a record onto
/// itself is a no-op.
///
/// # Safety
///
/// Both records must hold at least `size` bytes and must not partially
/// overlap. The copied bytes are duplicated verbatim: if they include owning
/// fields (`String`, `Vec`, `RawSeq`, ...), the caller must make sure only one
/// of the two records ends up dropping them.
#[inline]
pub unsafe fn copy_bytes(src: &RecordHandle<'_>, dst: &RecordHandle<'_>, size: usize) {
    debug_assert!(size <= src.extent(), "copy past source extent");
    debug_assert!(size <= dst.extent(), "copy past destination extent");
    if size == 0 || src.base() == dst.base() {
        return;
    }
    // SAFETY: caller guarantees both regions are `size` bytes and disjoint.
    unsafe { ptr::copy_nonoverlapping(src.base().as_ptr(), dst.base().as_ptr(), size) }
}

impl RecordHandle<'_> {
    /// Overwrite this record's first `size` bytes with `src`'s.
    ///
    /// # Safety
    ///
    /// Same contract as [`copy_bytes`].
    #[inline]
    pub unsafe fn copy_from(&self, src: &RecordHandle<'_>, size: usize) {
        // SAFETY: forwarded to the caller.
        unsafe { copy_bytes(src, self, size) }
    }
}
