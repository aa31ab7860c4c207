//! Language-aware comment lexing.
//!
//! [`parse_comment_ranges`] maps a normalized source string plus a file
//! name to the list of byte ranges that are comments, using one of two
//! single-pass state machines selected by the file's extension. Neither
//! mode performs syntactic analysis; they exist only to avoid being
//! fooled by string and character literals that happen to contain
//! comment-like sequences.

mod c_family;
mod mode;
mod python;

pub use mode::Mode;

use tt_text_size::TextRange;

/// Select a lexing [`Mode`] from `file_name`'s lowercased extension and
/// lex `text` for comment ranges. Files with an unrecognized extension
/// (including none at all) yield no comment ranges.
///
/// The result is in source order, non-overlapping, and every range
/// satisfies `end > start`.
#[must_use]
pub fn parse_comment_ranges(text: &str, file_name: &str) -> Vec<TextRange> {
    match Mode::from_file_name(file_name) {
        Some(Mode::CFamily) => c_family::lex(text),
        Some(Mode::Python) => python::lex(text),
        None => Vec::new(),
    }
}
