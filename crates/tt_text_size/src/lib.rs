//! Byte-offset primitives shared by every stage of the typing pipeline.
//!
//! [`TextSize`] is a `u32` newtype and [`TextRange`] a half-open pair of
//! them. Keeping these in their own leaf crate means the lexer, the
//! segmenter and the skip-range planner all agree, at the type level, on
//! what an offset and a range are instead of passing around bare
//! `(usize, usize)` tuples with subtly different conventions.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A zero-based byte offset into some reference string.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TextSize(u32);

impl TextSize {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TextSize {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<usize> for TextSize {
    fn from(value: usize) -> Self {
        Self(u32::try_from(value).expect("offset exceeds u32::MAX"))
    }
}

impl From<TextSize> for usize {
    fn from(value: TextSize) -> Self {
        value.to_usize()
    }
}

impl Add for TextSize {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for TextSize {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for TextSize {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for TextSize {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A half-open `[start, end)` byte range. `start <= end` is an invariant
/// of every public constructor; there is deliberately no way to build an
/// inverted range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    /// # Panics
    /// Panics if `end < start`.
    pub fn new(start: TextSize, end: TextSize) -> Self {
        assert!(start <= end, "TextRange start {start:?} > end {end:?}");
        Self { start, end }
    }

    #[must_use]
    pub fn at(offset: TextSize, len: TextSize) -> Self {
        Self::new(offset, offset + len)
    }

    #[must_use]
    pub fn empty(offset: TextSize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[must_use]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[must_use]
    pub fn len(self) -> TextSize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn contains(self, offset: TextSize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True if `offset` is strictly inside the range (not at either bound).
    #[must_use]
    pub fn strictly_contains(self, offset: TextSize) -> bool {
        self.start < offset && offset < self.end
    }

    #[must_use]
    pub fn contains_range(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if `self` and `other` touch or overlap, i.e. folding them
    /// into one range would not introduce a gap.
    #[must_use]
    pub fn touches_or_overlaps(self, other: Self) -> bool {
        other.start <= self.end
    }

    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Re-express `self` relative to `base`, clamped to `[0, base.len())`.
    /// Used to translate a range in absolute offsets (e.g. a comment
    /// range over the whole file) into a range local to a segment.
    #[must_use]
    pub fn clamp_and_shift(self, base: Self) -> Option<Self> {
        let clamped = self.intersect(base)?;
        if clamped.is_empty() {
            return None;
        }
        Some(Self {
            start: clamped.start - base.start,
            end: clamped.end - base.start,
        })
    }

    /// Shift both ends of `self` by `offset`.
    #[must_use]
    pub fn checked_sub(self, offset: TextSize) -> Option<Self> {
        if offset <= self.start {
            Some(Self {
                start: self.start - offset,
                end: self.end - offset,
            })
        } else {
            None
        }
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Implemented by every type that carries a position in some reference
/// string: segments, comment ranges, skip ranges. Mirrors the way the
/// corpus's own AST nodes expose their source range.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }

    fn len(&self) -> TextSize {
        self.range().len()
    }

    fn is_empty(&self) -> bool {
        self.range().is_empty()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged> Ranged for &T {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}

/// Sort `ranges` by `(start, end)`, drop empty ranges, and fold any pair
/// where `next.start <= current.end` into a single range whose `end` is
/// the max of the two. The result is sorted, non-overlapping, and
/// contains no empty range.
#[must_use]
pub fn merge_ranges(ranges: impl IntoIterator<Item = TextRange>) -> Vec<TextRange> {
    let mut ranges: Vec<TextRange> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
    ranges.sort_by_key(|r| (r.start(), r.end()));

    let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start() <= last.end() => {
                if range.end() > last.end() {
                    *last = TextRange::new(last.start(), range.end());
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Clamp every range to `[0, len]` before merging; ranges entirely
/// outside the bound are dropped.
#[must_use]
pub fn merge_ranges_clamped(
    ranges: impl IntoIterator<Item = TextRange>,
    len: TextSize,
) -> Vec<TextRange> {
    let bound = TextRange::new(TextSize::new(0), len);
    merge_ranges(ranges.into_iter().filter_map(|r| r.intersect(bound)))
}

/// Re-express byte-offset `ranges` over `text` as `char`-index ranges.
///
/// Comment and skip ranges are produced by byte-level scanners
/// (`as_bytes()`), but a consumer that walks `text.chars()` needs
/// positions in that index space instead. Every range endpoint is
/// assumed to already fall on a `char` boundary, which holds for any
/// range built by scanning `text` one `char`/byte at a time; endpoints
/// beyond `text.len()` map past the last `char`.
#[must_use]
pub fn byte_ranges_to_char_ranges(text: &str, ranges: &[TextRange]) -> Vec<TextRange> {
    if ranges.is_empty() {
        return Vec::new();
    }
    // Only byte offsets that land on a char boundary are ever looked up
    // (every range endpoint does, by this function's contract), so it
    // suffices to stamp each boundary's char index and leave the rest 0.
    let mut byte_to_char = vec![0u32; text.len() + 1];
    let mut char_index = 0u32;
    for (byte_offset, _) in text.char_indices() {
        byte_to_char[byte_offset] = char_index;
        char_index += 1;
    }
    byte_to_char[text.len()] = char_index;

    ranges
        .iter()
        .map(|range| {
            let start = byte_to_char[range.start().to_usize().min(text.len())];
            let end = byte_to_char[range.end().to_usize().min(text.len())];
            TextRange::new(TextSize::new(start), TextSize::new(end))
        })
        .collect()
}

/// `true` if `offset` falls inside any range of a *sorted, non-overlapping*
/// range list. Implemented as a binary search since this sits on the
/// typing engine's hot path.
#[must_use]
pub fn contains_offset(sorted_ranges: &[TextRange], offset: TextSize) -> bool {
    find_containing(sorted_ranges, offset).is_some()
}

/// Binary-search `sorted_ranges` (sorted by start, non-overlapping) for
/// the range containing `offset`, returning its index.
#[must_use]
pub fn find_containing(sorted_ranges: &[TextRange], offset: TextSize) -> Option<usize> {
    let idx = sorted_ranges
        .partition_point(|range| range.end() <= offset);
    sorted_ranges
        .get(idx)
        .filter(|range| range.contains(offset))
        .map(|_| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn merge_is_order_insensitive() {
        let a = merge_ranges([r(0, 2), r(5, 7), r(2, 4)]);
        let b = merge_ranges([r(5, 7), r(2, 4), r(0, 2)]);
        assert_eq!(a, b);
        assert_eq!(a, vec![r(0, 4), r(5, 7)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_ranges([r(0, 2), r(5, 7), r(2, 4)]);
        let twice = merge_ranges(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_drops_empty_ranges() {
        let merged = merge_ranges([r(3, 3), r(0, 1)]);
        assert_eq!(merged, vec![r(0, 1)]);
    }

    #[test]
    fn touching_ranges_fold_together() {
        // [0, 2) and [2, 4) touch exactly at 2 and must fold into one.
        let merged = merge_ranges([r(0, 2), r(2, 4)]);
        assert_eq!(merged, vec![r(0, 4)]);
    }

    #[test]
    fn contains_offset_binary_search() {
        let ranges = merge_ranges([r(0, 2), r(5, 7), r(10, 20)]);
        assert!(contains_offset(&ranges, TextSize::new(1)));
        assert!(!contains_offset(&ranges, TextSize::new(2)));
        assert!(contains_offset(&ranges, TextSize::new(6)));
        assert!(!contains_offset(&ranges, TextSize::new(9)));
        assert!(contains_offset(&ranges, TextSize::new(19)));
        assert!(!contains_offset(&ranges, TextSize::new(20)));
    }

    #[test]
    fn clamp_and_shift_translates_to_local_offsets() {
        let base = r(10, 20);
        let absolute = r(12, 15);
        let local = absolute.clamp_and_shift(base).unwrap();
        assert_eq!(local, r(2, 5));
    }

    #[test]
    fn clamp_and_shift_clips_partial_overlap() {
        let base = r(10, 20);
        let absolute = r(5, 15);
        let local = absolute.clamp_and_shift(base).unwrap();
        assert_eq!(local, r(0, 5));
    }

    #[test]
    fn clamp_and_shift_none_when_disjoint() {
        let base = r(10, 20);
        assert!(r(0, 5).clamp_and_shift(base).is_none());
    }

    #[test]
    #[should_panic(expected = "start")]
    fn inverted_range_panics() {
        TextRange::new(TextSize::new(5), TextSize::new(1));
    }

    #[test]
    fn byte_ranges_to_char_ranges_is_identity_for_ascii() {
        let text = "a/*c*/b";
        let byte_ranges = [r(1, 6)];
        assert_eq!(byte_ranges_to_char_ranges(text, &byte_ranges), vec![r(1, 6)]);
    }

    #[test]
    fn byte_ranges_to_char_ranges_shrinks_for_multibyte_prefix() {
        // "é" is 2 bytes/1 char; the comment starts right after it.
        let text = "é/*c*/b";
        let byte_ranges = [r(2, 7)];
        assert_eq!(byte_ranges_to_char_ranges(text, &byte_ranges), vec![r(1, 6)]);
    }

    #[test]
    fn byte_ranges_to_char_ranges_handles_trailing_multibyte_char() {
        // "a//é" comment covers the whole 5-byte string but only 3 chars.
        let text = "a//é";
        let byte_ranges = [r(0, 5)];
        assert_eq!(byte_ranges_to_char_ranges(text, &byte_ranges), vec![r(0, 3)]);
    }
}
