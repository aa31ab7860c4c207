use tt_text_size::{byte_ranges_to_char_ranges, find_containing, merge_ranges_clamped, TextRange, TextSize};

/// The state of a single character position in the segment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Untouched,
    Correct,
    Incorrect,
    Collateral,
}

/// A single practice session over one segment's text: cursor position,
/// per-character marks, and the keystroke counters a visual layer and
/// [`crate::metrics`] read from.
///
/// Every mutation goes through [`EngineState::handle_key`] or
/// [`EngineState::handle_backspace`]; there is no public way to write
/// `marks` directly, which is what keeps `correct_chars` consistent with
/// `counted_correct` (see [`EngineState::set_mark`]).
#[derive(Debug, Clone)]
pub struct EngineState {
    text: Vec<char>,
    skip_ranges: Vec<TextRange>,
    slack_n: u32,
    auto_skip_blank_lines: bool,
    allow_whitespace_advance_to_newline: bool,

    marks: Vec<Mark>,
    counted_correct: Vec<bool>,
    typed_positions: Vec<usize>,

    cursor: usize,
    typed_end: usize,
    error_active: bool,
    first_error_index: usize,
    first_error_typed_progress: Option<usize>,
    locked: bool,

    typed_keystrokes: u64,
    incorrect: u64,
    collateral: u64,
    backspaces: u64,
    correct_chars: u64,
}

impl EngineState {
    /// Builds a new session. `skip_ranges` are byte offsets into `text`
    /// (the unit every upstream producer — the trivia lexer, the
    /// skip-range planner — works in); they are translated into `char`
    /// indices here, since the engine itself walks and indexes `text` by
    /// `char`, then clamped, merged and sorted regardless of the
    /// caller's input. The cursor is then advanced past any skip range
    /// starting at offset `0`.
    #[must_use]
    pub fn create(
        text: &str,
        slack_n: u32,
        auto_skip_blank_lines: bool,
        skip_ranges: Vec<TextRange>,
        allow_whitespace_advance_to_newline: bool,
    ) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let len = TextSize::from(chars.len());
        let skip_ranges = byte_ranges_to_char_ranges(text, &skip_ranges);
        let skip_ranges = merge_ranges_clamped(skip_ranges, len);

        let mut engine = Self {
            text: chars,
            skip_ranges,
            slack_n,
            auto_skip_blank_lines,
            allow_whitespace_advance_to_newline,
            marks: vec![Mark::Untouched; len.to_usize()],
            counted_correct: vec![false; len.to_usize()],
            typed_positions: Vec::new(),
            cursor: 0,
            typed_end: 0,
            error_active: false,
            first_error_index: 0,
            first_error_typed_progress: None,
            locked: false,
            typed_keystrokes: 0,
            incorrect: 0,
            collateral: 0,
            backspaces: 0,
            correct_chars: 0,
        };
        engine.skip_forward();
        engine.typed_end = engine.cursor;
        engine
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of positions the user is expected to strike, i.e. not
    /// covered by any skip range.
    #[must_use]
    pub fn typeable_chars(&self) -> usize {
        let skipped: usize = self.skip_ranges.iter().map(|r| r.len().to_usize()).sum();
        self.text.len() - skipped
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn typed_end(&self) -> usize {
        self.typed_end
    }

    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    #[must_use]
    pub fn error_active(&self) -> bool {
        self.error_active
    }

    #[must_use]
    pub fn first_error_index(&self) -> Option<usize> {
        self.error_active.then_some(self.first_error_index)
    }

    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn typed_keystrokes(&self) -> u64 {
        self.typed_keystrokes
    }

    #[must_use]
    pub fn incorrect(&self) -> u64 {
        self.incorrect
    }

    #[must_use]
    pub fn collateral(&self) -> u64 {
        self.collateral
    }

    #[must_use]
    pub fn backspaces(&self) -> u64 {
        self.backspaces
    }

    #[must_use]
    pub fn correct_chars(&self) -> u64 {
        self.correct_chars
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.text.len() && !self.error_active && !self.locked
    }

    /// While the cursor lies inside any skip range, jump it to that
    /// range's end. Binary search over the sorted, non-overlapping
    /// range list, looped since a skip range's end can itself be the
    /// start of the next one after merging degenerate inputs.
    fn skip_forward(&mut self) {
        while let Some(idx) = find_containing(&self.skip_ranges, TextSize::from(self.cursor)) {
            self.cursor = self.skip_ranges[idx].end().to_usize();
        }
    }

    /// The single routed writer for `marks`/`counted_correct`/
    /// `correct_chars`. `counted` distinguishes a CORRECT mark that
    /// should increment `correct_chars` from one that (per the
    /// auto-skip-blank-lines walk) should not.
    fn set_mark(&mut self, position: usize, mark: Mark, counted: bool) {
        if position >= self.marks.len() {
            return;
        }
        if self.counted_correct[position] {
            self.correct_chars -= 1;
        }
        self.marks[position] = mark;
        let now_counted = matches!(mark, Mark::Correct) && counted;
        self.counted_correct[position] = now_counted;
        if now_counted {
            self.correct_chars += 1;
        }
    }

    /// Consume one typed character.
    pub fn handle_key(&mut self, ch: char) {
        self.typed_keystrokes += 1;
        if self.locked {
            return;
        }
        self.skip_forward();
        if self.cursor >= self.text.len() {
            return;
        }
        let expected = self.text[self.cursor];

        if !self.error_active {
            let matched = ch == expected
                || (self.allow_whitespace_advance_to_newline && ch == ' ' && expected == '\n');
            if matched {
                self.accept_match(expected);
            } else {
                self.begin_error();
            }
        } else {
            self.advance_within_error();
        }
    }

    fn accept_match(&mut self, expected: char) {
        let position = self.cursor;
        if expected == '\n' && self.auto_skip_blank_lines {
            self.set_mark(position, Mark::Correct, true);
            self.typed_positions.push(position);
            self.cursor += 1;
            self.typed_end = self.cursor;
            while self.cursor < self.text.len() && self.text[self.cursor] == '\n' {
                self.set_mark(self.cursor, Mark::Correct, false);
                self.cursor += 1;
            }
        } else {
            self.set_mark(position, Mark::Correct, true);
            self.typed_positions.push(position);
            self.cursor += 1;
            self.typed_end = self.cursor;
        }
        self.skip_forward();
    }

    fn begin_error(&mut self) {
        let position = self.cursor;
        self.set_mark(position, Mark::Incorrect, false);
        // Snapshot taken before the push below: `typed_distance` measures
        // keystrokes committed *since* the first error, so the error
        // keystroke itself must not count toward that distance.
        self.first_error_typed_progress = Some(self.typed_positions.len());
        self.typed_positions.push(position);
        self.error_active = true;
        self.first_error_index = position;
        self.incorrect += 1;
        self.cursor += 1;
        self.typed_end = self.cursor;
        self.skip_forward();
    }

    fn advance_within_error(&mut self) {
        let typed_distance = self.first_error_typed_progress.map_or_else(
            || self.cursor.saturating_sub(self.first_error_index),
            |progress| self.typed_positions.len() - progress,
        );
        if typed_distance <= self.slack_n as usize {
            let position = self.cursor;
            self.set_mark(position, Mark::Collateral, false);
            self.typed_positions.push(position);
            self.collateral += 1;
            self.cursor += 1;
            self.typed_end = self.cursor;
            self.skip_forward();
        } else {
            self.locked = true;
            tracing::debug!(
                cursor = self.cursor,
                first_error_index = self.first_error_index,
                slack_n = self.slack_n,
                "slack exceeded, locking input"
            );
        }
    }

    /// Undo the effect of the last physically-typed keystroke.
    pub fn handle_backspace(&mut self) {
        self.typed_keystrokes += 1;
        self.backspaces += 1;
        if self.locked {
            tracing::debug!(cursor = self.cursor, "backspace clears lock");
        }
        self.locked = false;

        let Some(position) = self.typed_positions.pop() else {
            return;
        };
        self.cursor = position;
        self.typed_end = position;
        self.set_mark(position, Mark::Untouched, false);

        if self.error_active && self.cursor <= self.first_error_index {
            self.error_active = false;
            self.first_error_typed_progress = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(ranges: &[(u32, u32)]) -> Vec<TextRange> {
        ranges
            .iter()
            .map(|&(s, e)| TextRange::new(TextSize::new(s), TextSize::new(e)))
            .collect()
    }

    #[test]
    fn all_correct_three_char_segment() {
        let mut engine = EngineState::create("abc", 3, false, vec![], false);
        for ch in ['a', 'b', 'c'] {
            engine.handle_key(ch);
        }
        assert_eq!(engine.incorrect(), 0);
        assert_eq!(engine.collateral(), 0);
        assert_eq!(engine.backspaces(), 0);
        assert_eq!(engine.correct_chars(), 3);
        assert_eq!(engine.cursor(), 3);
        assert!(engine.is_complete());
        assert_eq!(
            engine.marks(),
            &[Mark::Correct, Mark::Correct, Mark::Correct]
        );
    }

    #[test]
    fn slack_within_bound() {
        let mut engine = EngineState::create("abcd", 3, false, vec![], false);
        for ch in ['x', 'b', 'c', 'd'] {
            engine.handle_key(ch);
        }
        assert_eq!(engine.incorrect(), 1);
        assert_eq!(engine.collateral(), 3);
        assert!(!engine.locked());
        assert!(engine.error_active());
        assert_eq!(engine.first_error_index(), Some(0));
        assert_eq!(engine.cursor(), 4);
        assert_eq!(
            engine.marks(),
            &[Mark::Incorrect, Mark::Collateral, Mark::Collateral, Mark::Collateral]
        );
    }

    #[test]
    fn exceeding_slack_locks() {
        let mut engine = EngineState::create("abcdef", 2, false, vec![], false);
        for ch in ['x', 'b', 'c', 'd'] {
            engine.handle_key(ch);
        }
        assert!(engine.locked());
        assert_eq!(engine.cursor(), 3);

        engine.handle_key('e');
        assert_eq!(engine.cursor(), 3);
        assert_eq!(engine.typed_keystrokes(), 5);

        engine.handle_backspace();
        assert!(!engine.locked());
        assert_eq!(engine.cursor(), 2);
        assert_eq!(engine.backspaces(), 1);
        assert_eq!(engine.marks()[2], Mark::Untouched);
    }

    #[test]
    fn auto_skip_blank_lines_collapses_consecutive_newlines() {
        let mut engine = EngineState::create("\n\nP", 3, true, vec![], false);
        engine.handle_key('\n');
        assert_eq!(engine.cursor(), 2);
        assert_eq!(engine.correct_chars(), 1);
        assert_eq!(engine.typed_keystrokes(), 1);
        assert_eq!(engine.marks()[0], Mark::Correct);
        assert_eq!(engine.marks()[1], Mark::Correct);
        assert_eq!(engine.marks()[2], Mark::Untouched);
    }

    #[test]
    fn skip_over_comment() {
        let mut engine = EngineState::create("a/*c*/b", 3, false, skip(&[(1, 6)]), false);
        engine.handle_key('a');
        assert_eq!(engine.cursor(), 6);
        engine.handle_key('b');
        assert_eq!(engine.cursor(), 7);
        assert!(engine.is_complete());
        assert_eq!(engine.correct_chars(), 2);
        assert_eq!(engine.typed_keystrokes(), 2);
    }

    #[test]
    fn slack_counts_exclude_skipped_ranges() {
        let mut engine = EngineState::create("a/*c*/b", 1, false, skip(&[(1, 6)]), false);
        engine.handle_key('x');
        assert!(engine.error_active());
        assert_eq!(engine.first_error_index(), Some(0));
        assert_eq!(engine.cursor(), 6);
        assert!(!engine.locked());

        engine.handle_key('b');
        assert_eq!(engine.collateral(), 1);
        assert_eq!(engine.cursor(), 7);
        assert!(!engine.locked());
    }

    #[test]
    fn empty_text_is_immediately_complete() {
        let engine = EngineState::create("", 3, false, vec![], false);
        assert!(engine.is_complete());
        assert_eq!(engine.typeable_chars(), 0);
    }

    #[test]
    fn all_skip_segment_completes_without_any_key() {
        let engine = EngineState::create("xyz", 3, false, skip(&[(0, 3)]), false);
        assert_eq!(engine.cursor(), 3);
        assert!(engine.is_complete());
    }

    #[test]
    fn matching_key_then_backspace_pairs_return_to_baseline() {
        let mut engine = EngineState::create("abc", 3, false, vec![], false);
        let baseline_correct = engine.correct_chars();
        for _ in 0..3 {
            engine.handle_key('a');
            engine.handle_backspace();
        }
        assert_eq!(engine.correct_chars(), baseline_correct);
        assert!(engine.marks().iter().all(|m| matches!(m, Mark::Untouched)));
        assert_eq!(engine.typed_keystrokes(), 6);
        assert_eq!(engine.backspaces(), 3);
    }

    #[test]
    fn skip_ranges_in_byte_offsets_align_with_multibyte_text() {
        // "é//c\nx": a 2-byte 'é' followed by a line comment covering
        // bytes [2, 5) ("//c"). In char indices that comment is [1, 4).
        // Skip ranges arrive in byte offsets (as the trivia lexer
        // produces them); the engine must translate before indexing.
        let text = "é//c\nx";
        let mut engine = EngineState::create(text, 3, false, skip(&[(2, 5)]), false);
        engine.handle_key('é');
        assert_eq!(engine.cursor(), 4);
        engine.handle_key('\n');
        engine.handle_key('x');
        assert!(engine.is_complete());
        assert_eq!(engine.correct_chars(), 3);
    }

    #[test]
    fn whitespace_advances_to_newline_when_allowed() {
        let mut engine = EngineState::create("a\nb", 0, false, vec![], true);
        engine.handle_key('a');
        engine.handle_key(' ');
        assert_eq!(engine.marks()[1], Mark::Correct);
        assert_eq!(engine.cursor(), 2);
    }
}
