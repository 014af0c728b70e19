use crate::parsing::inline::types::InlineSpan;

/// `**exam emphasis**`. A ruby inside (`**{{base|reading}}**`) is expanded
/// like any other lower-precedence construct.
pub struct Emphasis;

impl Emphasis {
    pub const OPEN: &'static str = "**";
    pub const CLOSE: &'static str = "**";

    pub fn build(children: Vec<InlineSpan>) -> InlineSpan {
        InlineSpan::Emphasis { children }
    }
}
