use crate::parsing::inline::types::InlineSpan;

use super::single_text;

/// `{{base|reading}}`
pub struct Ruby;

impl Ruby {
    pub const OPEN: &'static str = "{{";
    pub const CLOSE: &'static str = "}}";
    pub const SEPARATOR: char = '|';

    /// Splits `base|reading`; both halves must be non-empty.
    pub fn split(s: &str) -> Option<(&str, &str)> {
        let (base, reading) = s.split_once(Self::SEPARATOR)?;
        if base.is_empty() || reading.is_empty() {
            return None;
        }
        Some((base, reading))
    }

    /// Only a plain `base|reading` capture is a ruby; anything else is
    /// handed back untouched.
    pub fn build(captured: Vec<InlineSpan>) -> Result<InlineSpan, Vec<InlineSpan>> {
        let ruby = single_text(&captured)
            .and_then(Self::split)
            .map(|(base, reading)| InlineSpan::ruby(base, reading));
        ruby.ok_or(captured)
    }
}
