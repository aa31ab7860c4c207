use tt_text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment { start: usize },
    BlockComment { start: usize },
    SingleQuote,
    DoubleQuote,
    Template,
}

/// Lex `text` as C-family source (covers the `c, h, cpp, cc, hpp, java,
/// js, ts, tsx, go, rs, cs, kt, swift, php, rb, scala, m, mm` family):
/// `//` and `/* */` comments, with `'`/`"`/`` ` `` quoted regions
/// tracked only so their contents cannot be mistaken for a comment
/// opener. Quoted regions are not themselves comments and are not
/// returned.
pub(crate) fn lex(text: &str) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut ranges = Vec::new();
    let mut state = State::Code;
    let mut i = 0;

    while i < len {
        match state {
            State::Code => match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    state = State::LineComment { start: i };
                    i += 2;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = State::BlockComment { start: i };
                    i += 2;
                }
                b'\'' => {
                    state = State::SingleQuote;
                    i += 1;
                }
                b'"' => {
                    state = State::DoubleQuote;
                    i += 1;
                }
                b'`' => {
                    state = State::Template;
                    i += 1;
                }
                _ => i += 1,
            },
            State::LineComment { start } => {
                if bytes[i] == b'\n' {
                    ranges.push(range(start, i));
                    state = State::Code;
                } else {
                    i += 1;
                }
            }
            State::BlockComment { start } => {
                if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    ranges.push(range(start, i + 2));
                    state = State::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            State::SingleQuote => i = advance_quote(bytes, i, b'\'', &mut state),
            State::DoubleQuote => i = advance_quote(bytes, i, b'"', &mut state),
            State::Template => i = advance_quote(bytes, i, b'`', &mut state),
        }
    }

    // Unterminated line/block comments are closed at end-of-input; an
    // unterminated quoted region is not a comment and emits nothing.
    match state {
        State::LineComment { start } | State::BlockComment { start } => {
            tracing::debug!(start, end = len, "closing unterminated comment at end of input");
            ranges.push(range(start, len));
        }
        State::SingleQuote | State::DoubleQuote | State::Template => {
            tracing::debug!(len, "unterminated quoted region at end of input");
        }
        State::Code => {}
    }

    ranges
}

/// Advance past one code unit inside a quoted state, honoring `\` as an
/// escape for the next code unit and returning to `Code` on the
/// matching (and only the matching) quote. Newlines do not end a quoted
/// state in this design: malformed input is tolerated and the lexer
/// recovers at end-of-input.
fn advance_quote(bytes: &[u8], i: usize, quote: u8, state: &mut State) -> usize {
    match bytes[i] {
        b'\\' => i + 2,
        b if b == quote => {
            *state = State::Code;
            i + 1
        }
        _ => i + 1,
    }
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn line_comment_ends_before_newline() {
        assert_eq!(lex("a //b\nc"), vec![r(2, 5)]);
    }

    #[test]
    fn unterminated_line_comment_closes_at_eof() {
        assert_eq!(lex("a //b"), vec![r(2, 5)]);
    }

    #[test]
    fn block_comment_is_inclusive_of_both_delimiters() {
        assert_eq!(lex("a /*b*/c"), vec![r(2, 7)]);
    }

    #[test]
    fn unterminated_block_comment_closes_at_eof() {
        assert_eq!(lex("a /*b"), vec![r(2, 5)]);
    }

    #[test]
    fn string_contents_are_not_comments() {
        assert_eq!(lex(r#"let s = "// not a comment";"#), vec![]);
    }

    #[test]
    fn comment_opener_inside_string_does_not_start_a_comment() {
        assert_eq!(lex(r#"a = "/*"; // real comment"#), vec![r(10, 25)]);
    }

    #[test]
    fn escaped_quote_does_not_end_the_string() {
        // The escaped quote must not terminate the string early, so the
        // following `//` stays inside it and is not a comment.
        assert_eq!(lex(r#""a\"// not a comment""#), vec![]);
    }

    #[test]
    fn single_quoted_char_literal_is_tracked() {
        assert_eq!(lex(r"let c = '/'; // comment"), vec![r(13, 23)]);
    }

    #[test]
    fn template_literal_hides_delimiters() {
        assert_eq!(lex("`// inside template`"), vec![]);
    }

    #[test]
    fn newline_inside_string_does_not_reset_state() {
        // Malformed/unterminated string spanning a newline: the lexer
        // stays in the quoted state rather than resetting at the
        // newline, per the design's tolerance of malformed input.
        assert_eq!(lex("\"a\nb// not a comment\nc\""), vec![]);
    }
}
