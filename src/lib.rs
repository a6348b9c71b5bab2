//! # Segint
//!
//! A lossless codec for sorted sets of non-negative 64-bit integers. The
//! encoder partitions the input into alternating dense and sparse regions and
//! stores each as a segment: dense runs become bitmap segments (a 64-value
//! window packed into a truncated little-endian bitmap), sparse values become
//! delta-list segments (offsets from an anchor). The decoder expands segments
//! back into the original set.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! let values: Vec<i64> = (0..100).collect();
//! let encoded = segint::encode(&values).unwrap();
//! assert_eq!(encoded.len(), 2); // one filled bitmap + one partial bitmap
//!
//! let restored: BTreeSet<i64> = segint::decode(&encoded);
//! assert_eq!(restored.into_iter().collect::<Vec<_>>(), values);
//! ```
//!
//! ## Trusted input
//!
//! Callers that already hold sorted data can skip the ascending re-check:
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! let set: BTreeSet<i64> = [3, 90, 91, 5_000_000].into_iter().collect();
//! let encoded = segint::encode_set(&set).unwrap();
//! assert_eq!(segint::decode(&encoded), set);
//! ```
//!
//! ## Wire format
//!
//! The segment types derive `serde::{Serialize, Deserialize}`; framing is the
//! job of whichever generic serializer the application already uses. Encoding
//! stays stable under any such container because only the logical segment
//! values matter.

pub mod decode;
pub mod elapse;
pub mod encode;
pub mod error;
pub mod segment;

// Re-export commonly used items for convenience
pub use decode::decode;
pub use elapse::Elapse;
pub use encode::{encode, encode_presorted, encode_set};
pub use error::{Result, SegintError};
pub use segment::{
    BitmapSegment, DeltaListSegment, Segment, Segmented, BITMAP_SPAN, DELTA_LIST_SPAN,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
