/// Normalize `input` into the canonical form every downstream offset is
/// computed against: drop a leading BOM, collapse CRLF/CR to LF, and
/// expand tabs to `tab_width` spaces (or delete them when `tab_width`
/// is `0`).
///
/// The output preserves the order and count of `'\n'` characters, so
/// line numbers computed over the normalized text match line numbers
/// in the (line-ending-normalized) original.
#[must_use]
pub fn normalize(input: &str, tab_width: u32) -> String {
    let without_bom = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut newlines_collapsed = String::with_capacity(without_bom.len());
    let mut chars = without_bom.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                newlines_collapsed.push('\n');
            }
            other => newlines_collapsed.push(other),
        }
    }

    if tab_width == 0 {
        newlines_collapsed.retain(|c| c != '\t');
        return newlines_collapsed;
    }

    if !newlines_collapsed.contains('\t') {
        return newlines_collapsed;
    }

    let replacement = " ".repeat(tab_width as usize);
    let mut expanded = String::with_capacity(newlines_collapsed.len());
    for ch in newlines_collapsed.chars() {
        if ch == '\t' {
            expanded.push_str(&replacement);
        } else {
            expanded.push(ch);
        }
    }
    expanded
}
