use std::fmt;
use std::num::NonZeroU32;

use tt_text_size::TextSize;

/// A 1-based line (or column) number; mirrors the corpus's own
/// `OneIndexed` line-number newtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroU32);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Construct from a zero-based value.
    #[must_use]
    pub fn from_zero_indexed(value: u32) -> Self {
        Self(NonZeroU32::new(value.saturating_add(1)).unwrap_or(NonZeroU32::MIN))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub fn to_zero_indexed(self) -> u32 {
        self.get() - 1
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Maps byte offsets in a normalized string to 1-based line numbers and
/// back to line-start offsets, with a single upfront pass over the text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first character of each line; `line_starts[0]`
    /// is always `0`.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    #[must_use]
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 40 + 1);
        line_starts.push(TextSize::new(0));
        for pos in memchr::memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(TextSize::from(pos + 1));
        }
        Self {
            line_starts,
            len: TextSize::from(text.len()),
        }
    }

    /// Byte offset that line `line` (1-based) starts at, or the length
    /// of the text if `line` is beyond the last line.
    #[must_use]
    pub fn line_start(&self, line: OneIndexed) -> TextSize {
        let index = line.to_zero_indexed() as usize;
        self.line_starts.get(index).copied().unwrap_or(self.len)
    }

    /// The 1-based line number containing `offset`.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        let index = self.line_starts.partition_point(|&start| start <= offset);
        OneIndexed::from_zero_indexed((index - 1) as u32)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[must_use]
    pub fn line_starts(&self) -> &[TextSize] {
        &self.line_starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_has_one_start() {
        let index = LineIndex::from_source_text("abc");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_start(OneIndexed::MIN), TextSize::new(0));
    }

    #[test]
    fn line_starts_after_each_newline() {
        let index = LineIndex::from_source_text("ab\ncd\nef");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(OneIndexed::from_zero_indexed(0)), TextSize::new(0));
        assert_eq!(index.line_start(OneIndexed::from_zero_indexed(1)), TextSize::new(3));
        assert_eq!(index.line_start(OneIndexed::from_zero_indexed(2)), TextSize::new(6));
    }

    #[test]
    fn line_index_round_trips_with_line_start() {
        let index = LineIndex::from_source_text("ab\ncd\nef");
        for offset in 0..8u32 {
            let line = index.line_index(TextSize::new(offset));
            assert!(index.line_start(line) <= TextSize::new(offset));
        }
    }

    #[test]
    fn trailing_newline_adds_an_empty_final_line() {
        let index = LineIndex::from_source_text("ab\n");
        assert_eq!(index.line_count(), 2);
    }
}
