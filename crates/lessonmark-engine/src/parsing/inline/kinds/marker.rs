use crate::parsing::inline::types::InlineSpan;

/// `==highlight==`
pub struct Marker;

impl Marker {
    pub const OPEN: &'static str = "==";
    pub const CLOSE: &'static str = "==";

    pub fn build(children: Vec<InlineSpan>) -> InlineSpan {
        InlineSpan::Marker { children }
    }
}
