//! Decoder: expands each segment independently into the output set.
//!
//! Segments carry no cross-segment state and are decoded in the order given;
//! membership is resorted by the set itself, so segment order is not load
//! bearing. Decoding is total: malformed increments or overlapping segments
//! produce an unexpected set rather than an error.

use crate::segment::{BitmapSegment, DeltaListSegment, Segment, Segmented, BITMAP_SPAN};
use byteorder::{ByteOrder, LittleEndian};
use std::collections::BTreeSet;

/// Reconstruct the integer set from its segmented representation.
///
/// # Example
///
/// ```rust
/// let encoded = segint::encode(&[10, 11, 12]).unwrap();
/// let set = segint::decode(&encoded);
/// assert!(set.contains(&11));
/// assert_eq!(set.len(), 3);
/// ```
pub fn decode(segmented: &Segmented) -> BTreeSet<i64> {
    let mut integers = BTreeSet::new();

    for segment in &segmented.segments {
        match segment {
            Segment::Bitmap(inner) => decode_bitmap(inner, &mut integers),
            Segment::DeltaList(inner) => decode_delta_list(inner, &mut integers),
        }
    }

    integers
}

fn decode_bitmap(segment: &BitmapSegment, set: &mut BTreeSet<i64>) {
    let start = segment.start;

    if segment.filled {
        for offset in 0..BITMAP_SPAN {
            set.insert(start + offset);
        }
        return;
    }

    set.insert(start);

    if segment.bit_increments.is_empty() {
        return;
    }

    // Stored bytes are a truncated little-endian u64; missing bytes are zero.
    let mut buffer = [0u8; 8];
    let len = segment.bit_increments.len().min(8);
    buffer[..len].copy_from_slice(&segment.bit_increments[..len]);

    let mut bits = LittleEndian::read_u64(&buffer);
    while bits != 0 {
        let position = bits.trailing_zeros() as i64;
        set.insert(start + position + 1);
        bits &= bits - 1;
    }
}

fn decode_delta_list(segment: &DeltaListSegment, set: &mut BTreeSet<i64>) {
    set.insert(segment.start);

    for &increment in &segment.increments {
        set.insert(segment.start + increment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        assert!(decode(&Segmented::default()).is_empty());
    }

    #[test]
    fn test_decode_filled_bitmap() {
        let segmented = Segmented {
            segments: vec![Segment::Bitmap(BitmapSegment {
                start: 100,
                filled: true,
                bit_increments: Vec::new(),
            })],
        };

        let set = decode(&segmented);
        let expected: BTreeSet<i64> = (100..164).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_decode_truncated_bitmap_is_zero_padded() {
        // One stored byte: offsets 1, 3 and 8 present.
        let segmented = Segmented {
            segments: vec![Segment::Bitmap(BitmapSegment {
                start: 10,
                filled: false,
                bit_increments: vec![0b1000_0101],
            })],
        };

        let set = decode(&segmented);
        let expected: BTreeSet<i64> = [10, 11, 13, 18].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_decode_anchor_only_bitmap() {
        let segmented = Segmented {
            segments: vec![Segment::Bitmap(BitmapSegment {
                start: 9,
                filled: false,
                bit_increments: Vec::new(),
            })],
        };

        let set = decode(&segmented);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_decode_delta_list() {
        let segmented = Segmented {
            segments: vec![Segment::DeltaList(DeltaListSegment {
                start: 1_000,
                increments: vec![5, 999, 1_500_000],
            })],
        };

        let set = decode(&segmented);
        let expected: BTreeSet<i64> = [1_000, 1_005, 1_999, 1_501_000].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_decode_is_order_independent() {
        let first = Segment::DeltaList(DeltaListSegment {
            start: 500,
            increments: vec![1],
        });
        let second = Segment::Bitmap(BitmapSegment {
            start: 0,
            filled: false,
            bit_increments: vec![0b11],
        });

        let forward = decode(&Segmented {
            segments: vec![first.clone(), second.clone()],
        });
        let reversed = decode(&Segmented {
            segments: vec![second, first],
        });
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_decode_overlapping_segments_is_best_effort() {
        // Overlap is not validated; membership just unions.
        let segmented = Segmented {
            segments: vec![
                Segment::DeltaList(DeltaListSegment {
                    start: 0,
                    increments: vec![2],
                }),
                Segment::DeltaList(DeltaListSegment {
                    start: 2,
                    increments: vec![3],
                }),
            ],
        };

        let set = decode(&segmented);
        let expected: BTreeSet<i64> = [0, 2, 5].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_decode_oversized_bitmap_ignores_extra_bytes() {
        // More than eight stored bytes cannot happen from our encoder; the
        // decoder clamps rather than panicking.
        let segmented = Segmented {
            segments: vec![Segment::Bitmap(BitmapSegment {
                start: 0,
                filled: false,
                bit_increments: vec![0b1; 9],
            })],
        };

        let set = decode(&segmented);
        assert_eq!(set.len(), 9); // anchor + one bit per retained byte
    }
}
