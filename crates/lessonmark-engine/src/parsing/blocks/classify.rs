use super::kinds::{Directive, DirectiveOpen, Heading, ImageLine, ListItem};

/// What a single line looks like, judged without any surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `:::`
    Close,
    /// `:::name{...}` or `::name{...}`
    Open(DirectiveOpen),
    Heading { depth: u8, text: String },
    ListItem { ordered: bool, text: String },
    Image { alt: String, src: String },
    Text(String),
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass {
    /// 1-based line number in the original source.
    pub number: usize,
    /// Leading whitespace width in chars (tabs count as one).
    pub indent: usize,
    pub kind: LineKind,
}

/// Classifies individual lines for the block parsing phase.
pub struct LineClassifier;

impl LineClassifier {
    /// Precedence: close, directive open, heading, image, list item, text.
    pub fn classify(&self, number: usize, line: &str) -> LineClass {
        let trimmed = line.trim();
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();

        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if Directive::is_close(trimmed) {
            LineKind::Close
        } else if let Some(open) = Directive::open(trimmed) {
            LineKind::Open(open)
        } else if let Some((depth, text)) = Heading::sig(trimmed) {
            LineKind::Heading {
                depth,
                text: text.to_string(),
            }
        } else if let Some((alt, src)) = ImageLine::sig(trimmed) {
            LineKind::Image {
                alt: alt.to_string(),
                src: src.to_string(),
            }
        } else if let Some((ordered, text)) = ListItem::sig(trimmed) {
            LineKind::ListItem {
                ordered,
                text: text.to_string(),
            }
        } else {
            LineKind::Text(trimmed.to_string())
        };

        LineClass {
            number,
            indent,
            kind,
        }
    }
}
