//! # Inline Kinds
//!
//! Each construct owns its delimiters and knows how to turn captured spans
//! into its `InlineSpan`. The scanner in `expand` never hardcodes `==` or
//! `[[`; it asks a [`Construct`].
//!
//! - **`Marker`**: `OPEN = "=="`, `CLOSE = "=="`
//! - **`Emphasis`**: `OPEN = "**"`, `CLOSE = "**"`
//! - **`Ruby`**: `OPEN = "{{"`, `CLOSE = "}}"`, `SEPARATOR = '|'`
//! - **`Term`**: `OPEN = "[["`, `CLOSE = "]]"`, `SEPARATOR = '|'`

pub mod emphasis;
pub mod marker;
pub mod ruby;
pub mod term;

pub use emphasis::Emphasis;
pub use marker::Marker;
pub use ruby::Ruby;
pub use term::Term;

use super::types::InlineSpan;

/// One inline construct, in expansion precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Marker,
    Emphasis,
    Ruby,
    Term,
}

impl Construct {
    /// Outer to inner. Each construct's capture is expanded with the
    /// constructs that follow it here.
    pub const PRECEDENCE: [Construct; 4] = [
        Construct::Marker,
        Construct::Emphasis,
        Construct::Ruby,
        Construct::Term,
    ];

    pub fn open(self) -> &'static str {
        match self {
            Construct::Marker => Marker::OPEN,
            Construct::Emphasis => Emphasis::OPEN,
            Construct::Ruby => Ruby::OPEN,
            Construct::Term => Term::OPEN,
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Construct::Marker => Marker::CLOSE,
            Construct::Emphasis => Emphasis::CLOSE,
            Construct::Ruby => Ruby::CLOSE,
            Construct::Term => Term::CLOSE,
        }
    }

    /// Builds the span from its captured (non-empty) interior.
    ///
    /// `expand` expands spans with the lower-precedence constructs. When the
    /// capture does not fit the construct, the captured spans are handed back
    /// so the caller can restore them as literal text.
    pub fn build(
        self,
        captured: Vec<InlineSpan>,
        expand: impl FnOnce(Vec<InlineSpan>) -> Vec<InlineSpan>,
    ) -> Result<InlineSpan, Vec<InlineSpan>> {
        match self {
            Construct::Marker => Ok(Marker::build(expand(captured))),
            Construct::Emphasis => Ok(Emphasis::build(expand(captured))),
            Construct::Ruby => Ruby::build(captured),
            Construct::Term => Ok(Term::build(captured, expand)),
        }
    }
}

/// The captured interior as a single plain string, if it is one.
pub(crate) fn single_text(captured: &[InlineSpan]) -> Option<&str> {
    match captured {
        [InlineSpan::Text(t)] => Some(t),
        _ => None,
    }
}
