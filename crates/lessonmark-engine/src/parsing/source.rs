use std::borrow::Cow;

/// Normalizes line endings to `\n` and drops a leading byte-order mark.
///
/// Borrows when the input needs no change.
pub fn normalize(source: &str) -> Cow<'_, str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    if !source.contains('\r') {
        return Cow::Borrowed(source);
    }
    Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
}
