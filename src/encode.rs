//! Encoder: a single left-to-right scan over ascending input, with one
//! active segment builder at a time.
//!
//! For every adjacent pair the upcoming gap selects the desired builder mode
//! (bitmap when `gap < BITMAP_SPAN`, delta list otherwise); a mode change
//! flushes the active builder and opens a new one anchored at the current
//! value. The lookahead optimizes for the gap ahead of `current`, not the gap
//! that produced it.

use crate::error::{Result, SegintError};
use crate::segment::{
    BitmapSegment, DeltaListSegment, Segment, Segmented, BITMAP_SPAN, DELTA_LIST_SPAN,
};
use byteorder::{ByteOrder, LittleEndian};
use std::cell::RefCell;
use std::collections::BTreeSet;

const BITS_PER_BYTE: u32 = 8;

/// Sets at or above this size are copied through a reused scratch buffer.
const POOL_THRESHOLD: usize = 1024;

thread_local! {
    static SCRATCH: RefCell<Vec<i64>> = const { RefCell::new(Vec::new()) };
}

/// Encode a strictly ascending slice of non-negative integers.
///
/// Validates the whole input up front: the first element must be
/// non-negative and every pair strictly ascending. Empty input yields an
/// empty representation.
///
/// # Example
///
/// ```rust
/// let segments = segint::encode(&[3, 4, 5, 900]).unwrap();
/// let restored = segint::decode(&segments);
/// assert_eq!(restored.into_iter().collect::<Vec<_>>(), vec![3, 4, 5, 900]);
/// ```
pub fn encode(sorted: &[i64]) -> Result<Segmented> {
    encode_with(sorted, true)
}

/// Encode input the caller guarantees to be strictly ascending.
///
/// Skips the ascending scan; the non-negative check on the first element is
/// still performed.
pub fn encode_presorted(sorted: &[i64]) -> Result<Segmented> {
    encode_with(sorted, false)
}

/// Encode a set, copying it into a contiguous buffer first.
///
/// Large sets reuse a thread-local scratch buffer to avoid the copy
/// allocation; this is a throughput optimization with no observable effect.
/// Set iteration order makes the ascending re-check unnecessary.
pub fn encode_set(set: &BTreeSet<i64>) -> Result<Segmented> {
    if set.len() >= POOL_THRESHOLD {
        SCRATCH.with(|cell| {
            let mut buffer = cell.borrow_mut();
            buffer.clear();
            buffer.extend(set.iter().copied());
            encode_with(&buffer, false)
        })
    } else {
        let buffer: Vec<i64> = set.iter().copied().collect();
        encode_with(&buffer, false)
    }
}

fn encode_with(sorted: &[i64], validate_sorted: bool) -> Result<Segmented> {
    let mut output = Segmented::default();
    if sorted.is_empty() {
        return Ok(output);
    }

    validate_non_negative(sorted)?;
    if validate_sorted {
        validate_ascending(sorted)?;
    }

    encode_core(sorted, &mut output);
    log::debug!(
        "encoded {} values into {} segments",
        sorted.len(),
        output.len()
    );

    Ok(output)
}

fn validate_non_negative(sorted: &[i64]) -> Result<()> {
    let first = sorted[0];
    if first < 0 {
        return Err(SegintError::NegativeValue(first));
    }
    Ok(())
}

fn validate_ascending(sorted: &[i64]) -> Result<()> {
    let mut prev = sorted[0];
    for &current in &sorted[1..] {
        if current <= prev {
            return Err(SegintError::NotAscending {
                prev,
                next: current,
            });
        }
        prev = current;
    }
    Ok(())
}

fn encode_core(sorted: &[i64], output: &mut Segmented) {
    if sorted.len() == 1 {
        output.segments.push(Segment::DeltaList(DeltaListSegment {
            start: sorted[0],
            increments: Vec::new(),
        }));
        return;
    }

    let mut builder = Builder::Idle;
    let last_idx = sorted.len() - 1;

    for idx in 0..last_idx {
        process_value(&mut builder, sorted[idx], sorted[idx + 1], output);
    }

    // The scan never feeds the last element; it either joins the builder it
    // already selected or anchors a fresh single-value delta list.
    let last = sorted[last_idx];
    if builder.mode() == Mode::None {
        builder = Builder::open(Mode::DeltaList, last);
    } else {
        builder.add(last, output);
    }
    builder.flush(output);
}

fn process_value(builder: &mut Builder, current: i64, next: i64, output: &mut Segmented) {
    let desired = if next - current < BITMAP_SPAN {
        Mode::Bitmap
    } else {
        Mode::DeltaList
    };

    if builder.mode() != desired {
        builder.flush(output);
        *builder = Builder::open(desired, current);
    } else {
        builder.add(current, output);
    }

    if builder.will_overflow(next) {
        builder.flush(output);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    None,
    Bitmap,
    DeltaList,
}

/// The single active builder. Transitions are explicit flush-then-reopen
/// steps; a flushed builder returns to `Idle`.
enum Builder {
    Idle,
    Bitmap(BitmapBuilder),
    DeltaList(DeltaListBuilder),
}

struct BitmapBuilder {
    start: i64,
    bits: u64,
    count: i64,
}

struct DeltaListBuilder {
    start: i64,
    increments: Vec<i64>,
}

impl Builder {
    fn open(mode: Mode, start: i64) -> Self {
        match mode {
            Mode::None => Builder::Idle,
            Mode::Bitmap => Builder::Bitmap(BitmapBuilder {
                start,
                bits: 0,
                count: 0,
            }),
            Mode::DeltaList => Builder::DeltaList(DeltaListBuilder {
                start,
                increments: Vec::new(),
            }),
        }
    }

    fn mode(&self) -> Mode {
        match self {
            Builder::Idle => Mode::None,
            Builder::Bitmap(_) => Mode::Bitmap,
            Builder::DeltaList(_) => Mode::DeltaList,
        }
    }

    /// Feed one value. An increment of zero is already represented by the
    /// anchor; an increment at or past the span flushes and reopens the same
    /// mode at the value.
    fn add(&mut self, value: i64, output: &mut Segmented) {
        match self {
            Builder::Idle => {}
            Builder::Bitmap(state) => {
                let increment = value - state.start;
                if increment == 0 {
                    return;
                }
                if increment >= BITMAP_SPAN {
                    std::mem::replace(self, Builder::open(Mode::Bitmap, value)).emit(output);
                    return;
                }

                // Masked shift: unsorted trusted-path input can produce a
                // non-positive increment here; degrade to garbage membership
                // instead of panicking.
                state.bits |= 1u64 << ((increment - 1) as u32 & 63);
                state.count += 1;

                // Saturated: every offset recorded, nothing more can join.
                if state.count == BITMAP_SPAN - 1 {
                    self.flush(output);
                }
            }
            Builder::DeltaList(state) => {
                let increment = value - state.start;
                if increment == 0 {
                    return;
                }
                if increment >= DELTA_LIST_SPAN {
                    std::mem::replace(self, Builder::open(Mode::DeltaList, value)).emit(output);
                    return;
                }

                state.increments.push(increment);
            }
        }
    }

    fn will_overflow(&self, next: i64) -> bool {
        match self {
            Builder::Idle => false,
            Builder::Bitmap(state) => next - state.start >= BITMAP_SPAN,
            Builder::DeltaList(state) => next - state.start >= DELTA_LIST_SPAN,
        }
    }

    fn flush(&mut self, output: &mut Segmented) {
        std::mem::replace(self, Builder::Idle).emit(output);
    }

    fn emit(self, output: &mut Segmented) {
        match self {
            Builder::Idle => {}
            Builder::Bitmap(state) => {
                output.segments.push(Segment::Bitmap(state.finish()));
            }
            Builder::DeltaList(state) => {
                output.segments.push(Segment::DeltaList(DeltaListSegment {
                    start: state.start,
                    increments: state.increments,
                }));
            }
        }
    }
}

impl BitmapBuilder {
    fn finish(self) -> BitmapSegment {
        // An anchor with no recorded offsets is still a valid segment.
        if self.count == 0 {
            return BitmapSegment {
                start: self.start,
                filled: false,
                bit_increments: Vec::new(),
            };
        }

        if self.count == BITMAP_SPAN - 1 {
            return BitmapSegment {
                start: self.start,
                filled: true,
                bit_increments: Vec::new(),
            };
        }

        let highest = 63 - self.bits.leading_zeros();
        let byte_len = (highest / BITS_PER_BYTE + 1) as usize;

        let mut buffer = [0u8; 8];
        LittleEndian::write_u64(&mut buffer, self.bits);

        BitmapSegment {
            start: self.start,
            filled: false,
            bit_increments: buffer[..byte_len].to_vec(),
        }
    }
}
