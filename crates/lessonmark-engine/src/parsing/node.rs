use serde::Serialize;

use super::{blocks::BlockNode, inline::InlineSpan, media::MediaNode};

/// Any child in the document tree.
///
/// Directive containers hold a mix: their paragraphs are unwrapped into
/// inline spans while nested directives, headings and lists stay blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Node {
    Block(BlockNode),
    Inline(InlineSpan),
    Media(MediaNode),
}

impl Node {
    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            Node::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_inline(&self) -> Option<&InlineSpan> {
        match self {
            Node::Inline(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaNode> {
        match self {
            Node::Media(m) => Some(m),
            _ => None,
        }
    }

    /// Flattens nodes to their readable text, dropping markup.
    pub fn plain_text(nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            node.push_plain(&mut out);
        }
        out
    }

    fn push_plain(&self, out: &mut String) {
        match self {
            Node::Inline(span) => span.push_plain(out),
            Node::Block(b) => {
                for child in &b.children {
                    child.push_plain(out);
                }
            }
            Node::Media(m) => {
                for span in &m.caption {
                    span.push_plain(out);
                }
            }
        }
    }
}
