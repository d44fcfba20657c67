//! Fixed-width field formatting for message-type columns.

/// Narrowest width at which an ellipsis leaves room for both ends of the text.
pub const MIN_ELLIPSIS_WIDTH: usize = 7;

const ELLIPSIS: &str = "...";
const HEAD_CHARS: usize = 3;

/// Pads or truncates `text` to exactly `width` characters.
///
/// Text shorter than `width` is right-padded with spaces. Longer text is
/// either cut to `width` characters or, with `ellipsis`, shortened to its
/// first three characters, `"..."` and its last `width - 6` characters. An
/// ellipsis needs at least [`MIN_ELLIPSIS_WIDTH`] columns; below that the
/// text is returned unchanged. Widths count characters, not bytes.
///
/// # Examples
///
/// ```
/// use logging::padded;
///
/// assert_eq!(padded("hello", 10, true), "hello     ");
/// assert_eq!(padded("abcdefghij", 5, false), "abcde");
/// assert_eq!(padded("abcdefghijklmnop", 10, true), "abc...mnop");
/// ```
#[must_use]
pub fn padded(text: &str, width: usize, ellipsis: bool) -> String {
    if ellipsis && width < MIN_ELLIPSIS_WIDTH {
        return text.to_owned();
    }

    let len = text.chars().count();
    if len <= width {
        let mut out = String::with_capacity(text.len() + (width - len));
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', width - len));
        return out;
    }

    if ellipsis {
        let tail = width - (HEAD_CHARS + ELLIPSIS.len());
        let mut out: String = text.chars().take(HEAD_CHARS).collect();
        out.push_str(ELLIPSIS);
        out.extend(text.chars().skip(len - tail));
        out
    } else {
        text.chars().take(width).collect()
    }
}
