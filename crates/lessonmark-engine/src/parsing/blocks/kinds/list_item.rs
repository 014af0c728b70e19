use std::sync::OnceLock;

use regex::Regex;

/// Markdown-style list items: `- `, `* `, `+ ` or `1. `.
pub struct ListItem;

impl ListItem {
    fn pattern() -> &'static Regex {
        static ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
        ITEM_REGEX.get_or_init(|| {
            Regex::new(r"^(?:(?P<bullet>[-*+])|(?P<number>\d{1,9})\.)\s+(?P<text>.*)$")
                .expect("Invalid list item regex")
        })
    }

    /// Returns `(ordered, text)` for a list item line.
    pub fn sig(line: &str) -> Option<(bool, &str)> {
        let caps = Self::pattern().captures(line.trim())?;
        let ordered = caps.name("number").is_some();
        let text = caps.name("text").map_or("", |m| m.as_str());
        Some((ordered, text.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- 打製石器", Some((false, "打製石器")))]
    #[case("* item", Some((false, "item")))]
    #[case("+ item", Some((false, "item")))]
    #[case("1. 第一", Some((true, "第一")))]
    #[case("12.  二桁", Some((true, "二桁")))]
    #[case("-no space", None)]
    #[case("1.no space", None)]
    #[case("**bold** text", None)]
    #[case("text", None)]
    fn list_item_sig(#[case] line: &str, #[case] expected: Option<(bool, &str)>) {
        assert_eq!(ListItem::sig(line), expected);
    }
}
