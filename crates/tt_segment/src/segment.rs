use tt_source::{LineIndex, OneIndexed};
use tt_text_size::{TextRange, TextSize};

use crate::SegmentConfig;

/// One unit of practice: a contiguous slice of the normalized source,
/// its 1-based inclusive line range, and (once [`attach_comment_ranges`]
/// has run) the comment ranges that fall inside it, expressed in
/// segment-local offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub start_line: OneIndexed,
    pub end_line: OneIndexed,
    pub text: String,
    pub range: TextRange,
    pub comment_ranges: Vec<TextRange>,
}

impl Segment {
    #[must_use]
    pub fn start_offset(&self) -> TextSize {
        self.range.start()
    }

    #[must_use]
    pub fn end_offset(&self) -> TextSize {
        self.range.end()
    }
}

struct Line {
    start: usize,
    end: usize,
}

impl Line {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

fn line_bounds(line_starts: &[TextSize], text_len: usize, index: usize) -> Line {
    let start = line_starts[index].to_usize();
    let end = if index + 1 < line_starts.len() {
        line_starts[index + 1].to_usize() - 1
    } else {
        text_len
    };
    Line { start, end }
}

/// Split `normalized` into segments bounded by `config`'s line count and
/// character cap, per the dual-rule algorithm: segments normally end at
/// a line boundary once either cap would be exceeded by the next line,
/// but a single line longer than the character cap is hard-split into
/// same-line slices of exactly that cap (the final slice may be
/// shorter).
#[must_use]
#[tracing::instrument(skip(normalized), fields(bytes = normalized.len()))]
pub fn split(normalized: &str, config: SegmentConfig) -> Vec<Segment> {
    if normalized.is_empty() {
        return Vec::new();
    }

    let line_index = LineIndex::from_source_text(normalized);
    let line_starts = line_index.line_starts();
    let num_lines = line_starts.len();
    let text_len = normalized.len();
    tracing::trace!(num_lines, "splitting normalized text into segments");

    let lines_per_segment = config.lines_per_segment();
    let max_segment_chars = config.max_segment_chars();

    let mut segments = Vec::new();
    let mut index = 0usize;

    let mut pending_start_offset: Option<usize> = None;
    let mut pending_start_line: usize = 0;
    let mut pending_end_line: usize = 0;
    let mut current_lines: u32 = 0;
    let mut current_chars: usize = 0;

    macro_rules! flush {
        () => {
            if let Some(start_offset) = pending_start_offset {
                let end_offset = line_bounds(line_starts, text_len, pending_end_line).end;
                segments.push(Segment {
                    index,
                    start_line: OneIndexed::from_zero_indexed(pending_start_line as u32),
                    end_line: OneIndexed::from_zero_indexed(pending_end_line as u32),
                    text: normalized[start_offset..end_offset].to_string(),
                    range: TextRange::new(TextSize::from(start_offset), TextSize::from(end_offset)),
                    comment_ranges: Vec::new(),
                });
                index += 1;
                pending_start_offset = None;
                current_lines = 0;
                current_chars = 0;
            }
        };
    }

    for line_idx in 0..num_lines {
        let line = line_bounds(line_starts, text_len, line_idx);
        let length = line.len();

        if length > max_segment_chars {
            flush!();
            let mut chunk_start = line.start;
            while chunk_start < line.end {
                let chunk_end = (chunk_start + max_segment_chars).min(line.end);
                segments.push(Segment {
                    index,
                    start_line: OneIndexed::from_zero_indexed(line_idx as u32),
                    end_line: OneIndexed::from_zero_indexed(line_idx as u32),
                    text: normalized[chunk_start..chunk_end].to_string(),
                    range: TextRange::new(TextSize::from(chunk_start), TextSize::from(chunk_end)),
                    comment_ranges: Vec::new(),
                });
                index += 1;
                chunk_start = chunk_end;
            }
            continue;
        }

        let mut projected_lines = current_lines + 1;
        let mut projected_chars = if current_lines == 0 {
            length
        } else {
            current_chars + 1 + length
        };

        if current_lines > 0
            && (projected_lines > lines_per_segment || projected_chars > max_segment_chars)
        {
            flush!();
            projected_lines = 1;
            projected_chars = length;
        }

        if pending_start_offset.is_none() {
            pending_start_offset = Some(line.start);
            pending_start_line = line_idx;
        }
        current_lines = projected_lines;
        current_chars = projected_chars;
        pending_end_line = line_idx;
    }

    flush!();

    tracing::trace!(count = segments.len(), "segmentation complete");
    segments
}

/// Intersect `global_comments` (in absolute, whole-file offsets) with
/// each segment's range and translate the overlap into segment-local
/// offsets, in place. Both `segments` and `global_comments` are assumed
/// sorted by start offset, which lets this run as a single linear merge
/// rather than a search per segment.
pub fn attach_comment_ranges(segments: &mut [Segment], global_comments: &[TextRange]) {
    let mut comment_idx = 0;
    for segment in segments.iter_mut() {
        while comment_idx < global_comments.len()
            && global_comments[comment_idx].end() <= segment.start_offset()
        {
            comment_idx += 1;
        }
        let mut local = Vec::new();
        let mut probe = comment_idx;
        while probe < global_comments.len() && global_comments[probe].start() < segment.end_offset() {
            if let Some(range) = global_comments[probe].clamp_and_shift(segment.range) {
                local.push(range);
            }
            probe += 1;
        }
        segment.comment_ranges = local;
    }
}
