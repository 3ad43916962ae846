pub mod copy_op;
mod handle;
pub mod raw_seq;
pub mod scalar_op;
pub mod seq_op;

pub use copy_op::copy_bytes;
pub use handle::RecordHandle;
pub use raw_seq::{RawSeq, RecordLayout};
pub use scalar_op::{
    BoolField, Boxed, Bytes, Inline, Nested, Opt, RefBool, RefBytes, RefText, RefWord16,
    RefWord32, RefWord64, Text, Word16, Word32, Word64,
};
pub use seq_op::{
    BoolSeq, ByteSeq, BytesSeq, RecordRefs, Seq, TextSeq, Word16Seq, Word32Seq, Word64Seq,
};

#[cfg(test)]
mod tests;
