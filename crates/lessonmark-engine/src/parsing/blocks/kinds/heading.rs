/// ATX heading syntax (`## 見出し`).
pub struct Heading;

impl Heading {
    pub const MARK: char = '#';
    pub const MAX_DEPTH: usize = 6;

    /// Returns `(depth, text)` for a heading line.
    ///
    /// The marks must be followed by whitespace or end the line; trailing
    /// closing marks (`## title ##`) are stripped.
    pub fn sig(line: &str) -> Option<(u8, &str)> {
        let t = line.trim();
        let depth = t.chars().take_while(|&c| c == Self::MARK).count();
        if depth == 0 || depth > Self::MAX_DEPTH {
            return None;
        }
        let rest = &t[depth..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let text = rest.trim().trim_end_matches(Self::MARK).trim_end();
        Some((depth as u8, text))
    }
}
