//! Data model for the segmented representation.
//!
//! A sorted integer set is stored as an ordered run of [`Segment`]s, each
//! anchored at a `start` value. Dense regions become [`BitmapSegment`]s
//! (a 64-value window encoded as a truncated little-endian bitmap), sparse
//! regions become [`DeltaListSegment`]s (offsets from `start`). The byte-level
//! framing of these values is delegated to serde; this crate only defines the
//! logical shape.

use serde::{Deserialize, Serialize};

/// A bitmap segment covers offsets `0..BITMAP_SPAN` from its start, i.e. up
/// to 63 values beyond `start` itself.
pub const BITMAP_SPAN: i64 = 64;

/// A delta-list segment's increments must each stay below this span.
pub const DELTA_LIST_SPAN: i64 = 2_000_000;

/// Ordered sequence of segments produced by [`crate::encode`].
///
/// Segment starts ascend because the encoder scans ascending input; the order
/// is not separately enforced and the decoder does not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmented {
    pub segments: Vec<Segment>,
}

impl Segmented {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One encoded chunk of the input, either encoding style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Bitmap(BitmapSegment),
    DeltaList(DeltaListSegment),
}

impl Segment {
    /// The anchor value; always a member of the represented set.
    pub fn start(&self) -> i64 {
        match self {
            Segment::Bitmap(segment) => segment.start,
            Segment::DeltaList(segment) => segment.start,
        }
    }
}

/// Dense segment: `start` plus a bitmap over `[start + 1, start + 63]`.
///
/// Bit `i` of the little-endian bitmap set means `start + i + 1` is present.
/// `bit_increments` is truncated to the smallest byte length that covers the
/// highest set bit; trailing zero bytes are never stored. When `filled` is
/// true all 63 offsets are present and the bitmap is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmapSegment {
    pub start: i64,
    pub filled: bool,
    pub bit_increments: Vec<u8>,
}

/// Sparse segment: `start` plus `start + d` for each increment `d`.
///
/// Increments are offsets from `start`, not from the previous element, and
/// are stored in the ascending order the encoder produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaListSegment {
    pub start: i64,
    pub increments: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_start() {
        let bitmap = Segment::Bitmap(BitmapSegment {
            start: 7,
            filled: false,
            bit_increments: vec![0b1],
        });
        let delta = Segment::DeltaList(DeltaListSegment {
            start: 90,
            increments: vec![120],
        });

        assert_eq!(bitmap.start(), 7);
        assert_eq!(delta.start(), 90);
    }

    #[test]
    fn test_default_is_empty() {
        let segmented = Segmented::default();
        assert!(segmented.is_empty());
        assert_eq!(segmented.len(), 0);
    }
}
