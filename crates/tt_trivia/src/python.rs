use tt_text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment { start: usize },
    SingleQuote,
    DoubleQuote,
    TripleSingle { start: usize },
    TripleDouble { start: usize },
}

/// Lex Python source for comment ranges: `#` line comments and, by this
/// design's deliberate choice (see the module-level design notes),
/// triple-quoted string literals — `'''...'''` and `"""..."""` — are
/// themselves recorded as comment ranges regardless of whether they sit
/// in docstring position. Single- and double-quoted strings are tracked
/// only so a comment opener inside them is not mistaken for a real one.
pub(crate) fn lex(text: &str) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut ranges = Vec::new();
    let mut state = State::Code;
    let mut i = 0;

    while i < len {
        match state {
            State::Code => match bytes[i] {
                b'#' => {
                    state = State::LineComment { start: i };
                    i += 1;
                }
                b'\'' if is_triple(bytes, i, b'\'') => {
                    state = State::TripleSingle { start: i };
                    i += 3;
                }
                b'"' if is_triple(bytes, i, b'"') => {
                    state = State::TripleDouble { start: i };
                    i += 3;
                }
                b'\'' => {
                    state = State::SingleQuote;
                    i += 1;
                }
                b'"' => {
                    state = State::DoubleQuote;
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
            State::SingleQuote => i = advance_quote(bytes, i, b'\'', &mut state),
            State::DoubleQuote => i = advance_quote(bytes, i, b'"', &mut state),
            State::TripleSingle { start } => i = advance_triple(bytes, i, b'\'', start, &mut ranges, &mut state),
            State::TripleDouble { start } => i = advance_triple(bytes, i, b'"', start, &mut ranges, &mut state),
        }
    }

    match state {
        State::LineComment { start }
        | State::TripleSingle { start }
        | State::TripleDouble { start } => {
            tracing::debug!(start, end = len, "closing unterminated comment at end of input");
            ranges.push(range(start, len));
        }
        State::SingleQuote | State::DoubleQuote => {
            tracing::debug!(len, "unterminated quoted region at end of input");
        }
        State::Code => {}
    }

    ranges
}

/// `true` if `bytes[i..]` starts with three of `quote` — triple-quote
/// openers are matched before a lone quote at the same position.
fn is_triple(bytes: &[u8], i: usize, quote: u8) -> bool {
    bytes.get(i) == Some(&quote) && bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote)
}

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

fn advance_triple(
    bytes: &[u8],
    i: usize,
    quote: u8,
    start: usize,
    ranges: &mut Vec<TextRange>,
    state: &mut State,
) -> usize {
    match bytes[i] {
        b'\\' => i + 2,
        b if b == quote && is_triple(bytes, i, quote) => {
            ranges.push(range(start, i + 3));
            *state = State::Code;
            i + 3
        }
        _ => i + 1,
    }
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}
