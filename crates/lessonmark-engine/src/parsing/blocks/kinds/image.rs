use std::sync::OnceLock;

use regex::Regex;

/// A line holding exactly one image reference: `![alt](path)` with an
/// optional `"title"` after the path.
pub struct ImageLine;

impl ImageLine {
    pub const PREFIX: &'static str = "![";

    fn pattern() -> &'static Regex {
        static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
        IMAGE_REGEX.get_or_init(|| {
            Regex::new(r#"^!\[(?P<alt>[^\]]*)\]\((?P<src>[^)\s]+)(?:\s+"[^"]*")?\)$"#)
                .expect("Invalid image line regex")
        })
    }

    /// Returns `(alt, src)` for an image line.
    pub fn sig(line: &str) -> Option<(&str, &str)> {
        let t = line.trim();
        if !t.starts_with(Self::PREFIX) {
            return None;
        }
        let caps = Self::pattern().captures(t)?;
        let alt = caps.name("alt").map_or("", |m| m.as_str());
        let src = caps.name("src").map_or("", |m| m.as_str());
        Some((alt, src))
    }
}
