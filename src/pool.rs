use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ptr::NonNull;
use tracing::{debug, trace};

// ─── PoolConfig ─────────────────────────────────────────────────────────────

/// Configuration for [`Pool::with_config`].
///
/// Each value is the number of cells carved out of a single allocation when
/// the slab for that width runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub bool_batch: NonZeroUsize,
    pub word16_batch: NonZeroUsize,
    pub word32_batch: NonZeroUsize,
    pub word64_batch: NonZeroUsize,
}

const DEFAULT_BOOL_BATCH: NonZeroUsize = NonZeroUsize::new(16).unwrap();
const DEFAULT_WORD16_BATCH: NonZeroUsize = NonZeroUsize::new(8).unwrap();
const DEFAULT_WORD32_BATCH: NonZeroUsize = NonZeroUsize::new(8).unwrap();
const DEFAULT_WORD64_BATCH: NonZeroUsize = NonZeroUsize::new(4).unwrap();

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            bool_batch: DEFAULT_BOOL_BATCH,
            word16_batch: DEFAULT_WORD16_BATCH,
            word32_batch: DEFAULT_WORD32_BATCH,
            word64_batch: DEFAULT_WORD64_BATCH,
        }
    }
}

impl PoolConfig {
    /// Read a config from JSON. Missing widths keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Same batch size for every width.
    pub fn uniform(batch: NonZeroUsize) -> Self {
        Self {
            bool_batch: batch,
            word16_batch: batch,
            word32_batch: batch,
            word64_batch: batch,
        }
    }
}

// ─── Slab ───────────────────────────────────────────────────────────────────

/// Batches of same-width cells. Only grows; batches are freed on drop.
///
/// Batches are held as raw slices so that handing out a new cell never
/// re-borrows cells that are already owned by some record field.
struct Slab<T: Copy + Default> {
    batch_size: NonZeroUsize,
    batches: Vec<NonNull<[T]>>,
    /// Next unused cell in the last batch.
    next: usize,
    handed_out: usize,
}

impl<T: Copy + Default> Slab<T> {
    fn new(batch_size: NonZeroUsize) -> Self {
        Self {
            batch_size,
            batches: Vec::new(),
            next: 0,
            handed_out: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        match self.batches.last() {
            Some(batch) => batch.len() - self.next,
            None => 0,
        }
    }

    #[inline]
    fn acquire(&mut self) -> NonNull<T> {
        if self.remaining() == 0 {
            self.replenish();
        }
        let batch = self.batches[self.batches.len() - 1];
        // SAFETY: `next < batch.len()` after the replenish check above.
        let cell = unsafe { batch.cast::<T>().add(self.next) };
        self.next += 1;
        self.handed_out += 1;
        cell
    }

    #[cold]
    fn replenish(&mut self) {
        let batch: Box<[T]> = vec![T::default(); self.batch_size.get()].into_boxed_slice();
        self.batches.push(NonNull::from(Box::leak(batch)));
        self.next = 0;
        trace!(
            width = size_of::<T>() * 8,
            batch_size = self.batch_size.get(),
            batches = self.batches.len(),
            "pool batch replenished"
        );
    }

    fn stats(&self) -> SlabStats {
        SlabStats {
            batches: self.batches.len(),
            cells_handed_out: self.handed_out,
            cells_reserved: self.batches.iter().map(|b| b.len()).sum(),
        }
    }
}

impl<T: Copy + Default> Drop for Slab<T> {
    fn drop(&mut self) {
        for batch in self.batches.drain(..) {
            // SAFETY: every batch came from `Box::leak` in `replenish` and is
            // released exactly once here.
            drop(unsafe { Box::from_raw(batch.as_ptr()) });
        }
    }
}

// ─── Stats ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlabStats {
    pub batches: usize,
    pub cells_handed_out: usize,
    pub cells_reserved: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub bools: SlabStats,
    pub words16: SlabStats,
    pub words32: SlabStats,
    pub words64: SlabStats,
}

// ─── Pool ───────────────────────────────────────────────────────────────────

/// Batch allocator for boxed-optional scalars.
///
/// One pool belongs to one encode/decode session. Every cell it hands out
/// stays valid until the pool is dropped, so records holding pooled fields
/// must not outlive it.
pub struct Pool {
    bools: Slab<bool>,
    words16: Slab<u16>,
    words32: Slab<u32>,
    words64: Slab<u64>,
}

impl Pool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        debug!(?config, "pool created");
        Self {
            bools: Slab::new(config.bool_batch),
            words16: Slab::new(config.word16_batch),
            words32: Slab::new(config.word32_batch),
            words64: Slab::new(config.word64_batch),
        }
    }

    /// Hand out one writable cell for `T`, allocating a new batch first if
    /// the current one is used up. The cell holds an unspecified value.
    #[inline]
    pub fn acquire<T: Word>(&mut self) -> NonNull<T> {
        T::acquire(self)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            bools: self.bools.stats(),
            words16: self.words16.stats(),
            words32: self.words32.stats(),
            words64: self.words64.stats(),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        let stats = self.stats();
        debug!(
            batches = stats.bools.batches
                + stats.words16.batches
                + stats.words32.batches
                + stats.words64.batches,
            cells = stats.bools.cells_handed_out
                + stats.words16.cells_handed_out
                + stats.words32.cells_handed_out
                + stats.words64.cells_handed_out,
            "pool dropped"
        );
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool").field("stats", &self.stats()).finish()
    }
}

// ─── Word ───────────────────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// Scalars that can live in a pooled cell.
///
/// Types of the same width share a slab: every bit pattern of the backing
/// unsigned word is a valid value of each type mapped onto it.
pub trait Word: Copy + sealed::Sealed {
    #[doc(hidden)]
    fn acquire(pool: &mut Pool) -> NonNull<Self>;
}

macro_rules! impl_word {
    ($slab:ident => $($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Word for $ty {
                #[inline]
                fn acquire(pool: &mut Pool) -> NonNull<Self> {
                    pool.$slab.acquire().cast::<$ty>()
                }
            }
        )+
    };
}

impl_word!(bools => bool);
impl_word!(words16 => u16, i16);
impl_word!(words32 => u32, i32, f32);
impl_word!(words64 => u64, i64, f64);
