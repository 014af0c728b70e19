use crate::parsing::inline::types::InlineSpan;

use super::{Ruby, single_text};

/// `[[term]]` and `[[base|reading]]`.
pub struct Term;

impl Term {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const SEPARATOR: char = Ruby::SEPARATOR;

    /// A plain `base|reading` capture becomes a term wrapping one ruby.
    /// Any other capture becomes a term over its (expanded) children, which
    /// may already hold spans built by earlier constructs.
    pub fn build(
        captured: Vec<InlineSpan>,
        expand: impl FnOnce(Vec<InlineSpan>) -> Vec<InlineSpan>,
    ) -> InlineSpan {
        let reading = single_text(&captured)
            .and_then(Ruby::split)
            .map(|(base, reading)| InlineSpan::ruby(base, reading));
        if let Some(ruby) = reading {
            return InlineSpan::Term {
                children: vec![ruby],
            };
        }
        InlineSpan::Term {
            children: expand(captured),
        }
    }
}
