//! Offset-addressed field access for reflection-driven serializers.
//!
//! A serializer resolves each field of a record layout to a [`FieldRef`]
//! once, then reads and writes fields of any record with that layout through
//! typed views built from a [`RecordHandle`]. Boxed-optional scalars draw
//! their storage from a per-session [`Pool`].

pub mod custom;
pub mod error;
pub mod field_value;
pub mod field_view;
pub mod pool;
pub mod types;

pub use error::{CodecError, FieldError};
pub use field_value::{FieldDesc, Value};
pub use field_view::{RawSeq, RecordHandle, RecordLayout, copy_bytes};
pub use pool::{Pool, PoolConfig, PoolStats, Word};
pub use types::{Extension, ExtensionMap, FieldKind, FieldRef, Repr};
