use serde::Serialize;

/// An inline node.
///
/// Spans nest freely: a marker may hold terms, a term may hold a marker or a
/// ruby, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineSpan {
    Text(String),
    /// An interactive term. Written `[[base|reading]]` it holds exactly one
    /// `Ruby` child.
    Term { children: Vec<InlineSpan> },
    /// Exam-relevant highlight.
    Marker { children: Vec<InlineSpan> },
    /// Exam emphasis, rendered red.
    Emphasis { children: Vec<InlineSpan> },
    Ruby { base: String, reading: String },
    Image { alt: String, src: String },
    LineBreak,
}

impl InlineSpan {
    pub fn text(s: impl Into<String>) -> Self {
        InlineSpan::Text(s.into())
    }

    pub fn ruby(base: impl Into<String>, reading: impl Into<String>) -> Self {
        InlineSpan::Ruby {
            base: base.into(),
            reading: reading.into(),
        }
    }

    /// Readable text of a span sequence. Ruby contributes its base only,
    /// images their alt text, line breaks a space.
    pub fn plain_text(spans: &[InlineSpan]) -> String {
        let mut out = String::new();
        for span in spans {
            span.push_plain(&mut out);
        }
        out
    }

    pub(crate) fn push_plain(&self, out: &mut String) {
        match self {
            InlineSpan::Text(t) => out.push_str(t),
            InlineSpan::Ruby { base, .. } => out.push_str(base),
            InlineSpan::Image { alt, .. } => out.push_str(alt),
            InlineSpan::LineBreak => out.push(' '),
            InlineSpan::Term { children }
            | InlineSpan::Marker { children }
            | InlineSpan::Emphasis { children } => {
                for child in children {
                    child.push_plain(out);
                }
            }
        }
    }
}
