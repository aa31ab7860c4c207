pub(crate) mod replay;
pub(crate) mod segment;

use std::path::Path;

use tt_engine::{EngineConfig, SkipPolicy};
use tt_segment::{Segment, SegmentConfig};
use tt_text_size::TextRange;

use crate::error::CliError;

/// Normalizer → Comment Lexer → Segmenter, the shared front half of
/// both subcommands. Returns the normalized text (segments borrow
/// nothing from it; each carries its own owned slice) alongside the
/// segments themselves.
pub(crate) fn prepare(path: &Path, config: &EngineConfig) -> Result<Vec<Segment>, CliError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;

    let normalized = tt_source::normalize(&raw, config.tab_width);
    tracing::debug!(path = %path.display(), bytes = normalized.len(), "normalized source");

    let comments = tt_trivia::parse_comment_ranges(&normalized, &file_name);
    tracing::debug!(count = comments.len(), "lexed comment ranges");

    let mut segments = tt_segment::split(
        &normalized,
        SegmentConfig::new(config.lines_per_segment, config.max_segment_chars),
    );
    tt_segment::attach_comment_ranges(&mut segments, &comments);
    tracing::debug!(count = segments.len(), "split into segments");

    Ok(segments)
}

/// The skip ranges the engine should use for one segment, composing its
/// comment ranges with the configured policy flags.
pub(crate) fn skip_ranges_for(segment: &Segment, config: &EngineConfig) -> Vec<TextRange> {
    tt_engine::plan_skip_ranges(
        &segment.text,
        &segment.comment_ranges,
        SkipPolicy {
            include_comments: config.include_comments,
            skip_leading_indentation: config.skip_leading_indentation,
            trim_trailing_whitespace: config.trim_trailing_whitespace,
        },
    )
}
