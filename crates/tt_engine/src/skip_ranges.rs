use tt_source::LineIndex;
use tt_text_size::{merge_ranges_clamped, TextRange, TextSize};

/// Policy flags that steer what the planner folds into the engine's
/// skip ranges. `auto_skip_blank_lines` is read by the engine directly
/// and is not consulted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipPolicy {
    pub include_comments: bool,
    pub skip_leading_indentation: bool,
    pub trim_trailing_whitespace: bool,
}

/// For each line of `text`, the maximal leading run of ASCII spaces.
fn leading_indentation(text: &str, line_index: &LineIndex) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let line_starts = line_index.line_starts();
    let mut ranges = Vec::new();
    for &start in line_starts {
        let mut end = start.to_usize();
        while bytes.get(end) == Some(&b' ') {
            end += 1;
        }
        if end > start.to_usize() {
            ranges.push(TextRange::new(start, TextSize::from(end)));
        }
    }
    ranges
}

/// For each line of `text`, the maximal trailing run of spaces or tabs
/// before the line terminator (or end-of-input for the last line).
fn trailing_whitespace(text: &str, line_index: &LineIndex) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let line_starts = line_index.line_starts();
    let len = bytes.len();
    let mut ranges = Vec::new();

    for (i, &start) in line_starts.iter().enumerate() {
        let line_end = if i + 1 < line_starts.len() {
            line_starts[i + 1].to_usize() - 1
        } else {
            len
        };
        let mut begin = line_end;
        while begin > start.to_usize() && matches!(bytes[begin - 1], b' ' | b'\t') {
            begin -= 1;
        }
        if begin < line_end {
            ranges.push(TextRange::new(TextSize::from(begin), TextSize::from(line_end)));
        }
    }
    ranges
}

/// For each comment range not already at column 0 of its line, the run
/// of spaces immediately preceding it, bounded below by the line start.
fn pre_comment_padding(
    text: &str,
    line_index: &LineIndex,
    comments: &[TextRange],
) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    for comment in comments {
        let line = line_index.line_index(comment.start());
        let line_start = line_index.line_start(line).to_usize();
        let comment_start = comment.start().to_usize();
        if comment_start == line_start {
            continue;
        }
        let mut begin = comment_start;
        while begin > line_start && bytes[begin - 1] == b' ' {
            begin -= 1;
        }
        if begin < comment_start {
            ranges.push(TextRange::new(
                TextSize::from(begin),
                TextSize::from(comment_start),
            ));
        }
    }
    ranges
}

/// For every `'\n'` in `text` whose entire containing line is covered
/// by `base`, the newline offset itself, as a one-byte range.
fn skippable_line_breaks(text: &str, line_index: &LineIndex, base: &[TextRange]) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let line_starts = line_index.line_starts();
    let mut ranges = Vec::new();

    for (i, &start) in line_starts.iter().enumerate() {
        let Some(&next_start) = line_starts.get(i + 1) else {
            continue;
        };
        let newline_offset = next_start.to_usize() - 1;
        if bytes.get(newline_offset) != Some(&b'\n') {
            continue;
        }
        let line_content = TextRange::new(start, TextSize::from(newline_offset));
        if line_content.is_empty() || is_covered(line_content, base) {
            ranges.push(TextRange::new(
                TextSize::from(newline_offset),
                TextSize::from(newline_offset + 1),
            ));
        }
    }
    ranges
}

/// `true` if `range` lies entirely within the union of `covering`
/// (sorted, non-overlapping).
fn is_covered(range: TextRange, covering: &[TextRange]) -> bool {
    if range.is_empty() {
        return true;
    }
    let mut cursor = range.start();
    while cursor < range.end() {
        match covering.iter().find(|c| c.contains(cursor) || c.start() == cursor) {
            Some(c) if c.start() <= cursor => cursor = c.end(),
            _ => return false,
        }
    }
    true
}

/// The engine's fully-composed skip ranges for one segment, per the
/// composition rules: leading indentation and trailing whitespace fold
/// in when their flags are set; comments and their padding fold in
/// unless `include_comments` is set; and, only when comments are being
/// skipped, newlines whose entire line is already covered become
/// skippable too.
#[must_use]
pub fn plan_skip_ranges(text: &str, comments: &[TextRange], policy: SkipPolicy) -> Vec<TextRange> {
    let line_index = LineIndex::from_source_text(text);
    let len = TextSize::from(text.len());

    let mut skip_space = Vec::new();
    if policy.skip_leading_indentation {
        skip_space.extend(leading_indentation(text, &line_index));
    }
    if !policy.include_comments {
        skip_space.extend(pre_comment_padding(text, &line_index, comments));
    }
    if policy.trim_trailing_whitespace {
        skip_space.extend(trailing_whitespace(text, &line_index));
    }
    let skip_space = merge_ranges_clamped(skip_space, len);

    let base_skip = if policy.include_comments {
        skip_space
    } else {
        merge_ranges_clamped(
            comments.iter().copied().chain(skip_space),
            len,
        )
    };

    let line_break_skip = if policy.include_comments {
        Vec::new()
    } else {
        skippable_line_breaks(text, &line_index, &base_skip)
    };

    merge_ranges_clamped(base_skip.into_iter().chain(line_break_skip), len)
}
