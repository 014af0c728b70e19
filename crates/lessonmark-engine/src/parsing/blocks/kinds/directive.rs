use std::collections::BTreeMap;

use crate::parsing::cursor::Cursor;

use super::attributes;

/// How a directive line is fenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveFence {
    /// `:::name`: opens a container closed by a later `:::`.
    Container,
    /// `::name`: single-line, closes itself.
    Leaf,
}

/// A recognized directive opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOpen {
    pub fence: DirectiveFence,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

pub struct Directive;

impl Directive {
    pub const CONTAINER: &'static str = ":::";
    pub const LEAF: &'static str = "::";

    /// A line consisting of exactly `:::` (surrounding whitespace ignored).
    pub fn is_close(line: &str) -> bool {
        line.trim() == Self::CONTAINER
    }

    /// Recognizes `:::name`, `:::name{attrs}`, `::name` and `::name{attrs}`.
    ///
    /// Returns `None` when the line is not a well-formed directive opener;
    /// such lines are paragraph text.
    pub fn open(line: &str) -> Option<DirectiveOpen> {
        let mut cur = Cursor::new(line.trim());

        let fence = if cur.eat(Self::CONTAINER) {
            DirectiveFence::Container
        } else if cur.eat(Self::LEAF) {
            DirectiveFence::Leaf
        } else {
            return None;
        };

        let name = cur.eat_while(Self::is_name_char);
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let attributes = if cur.peek() == Some(attributes::OPEN) {
            attributes::parse(&mut cur)?
        } else {
            BTreeMap::new()
        };

        if !cur.eof() {
            return None;
        }

        Some(DirectiveOpen {
            fence,
            name: name.to_string(),
            attributes,
        })
    }

    fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_exactly_three_colons() {
        assert!(Directive::is_close(":::"));
        assert!(Directive::is_close("  :::  "));
        assert!(!Directive::is_close("::::"));
        assert!(!Directive::is_close(":::top"));
    }

    #[test]
    fn container_open() {
        let open = Directive::open(":::top").unwrap();
        assert_eq!(open.fence, DirectiveFence::Container);
        assert_eq!(open.name, "top");
        assert!(open.attributes.is_empty());
    }

    #[test]
    fn container_open_with_attributes() {
        let open = Directive::open(r#":::gazo{size="half"}"#).unwrap();
        assert_eq!(open.name, "gazo");
        assert_eq!(open.attributes.get("size").map(String::as_str), Some("half"));
    }

    #[test]
    fn hyphenated_name() {
        let open = Directive::open(":::gazo-center").unwrap();
        assert_eq!(open.name, "gazo-center");
    }

    #[test]
    fn leaf_open() {
        let open = Directive::open("::arrow").unwrap();
        assert_eq!(open.fence, DirectiveFence::Leaf);
        assert_eq!(open.name, "arrow");
    }

    #[test]
    fn not_directives() {
        assert_eq!(Directive::open(":::"), None);
        assert_eq!(Directive::open("::::top"), None);
        assert_eq!(Directive::open(":::top extra words"), None);
        assert_eq!(Directive::open(":::1st"), None);
        assert_eq!(Directive::open(r#":::gazo{size="half""#), None);
        assert_eq!(Directive::open("：：：top"), None);
        assert_eq!(Directive::open("plain text"), None);
    }
}
