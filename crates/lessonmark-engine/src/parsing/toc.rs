//! Heading ids and the table of contents.

use serde::Serialize;

use super::{context::CompileContext, node::Node};

/// Fewer indexed headings than this and the document gets no TOC.
pub const MIN_TOC_HEADINGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// `chapter-N`, also set as the heading's `id` attribute.
    pub id: String,
    pub text: String,
    /// 0 for `##`, 1 for `###`.
    pub level: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

/// Assigns `chapter-N` ids to every `##`/`###` heading in document order,
/// nested containers included, and builds the TOC.
///
/// Returns `None` when fewer than [`MIN_TOC_HEADINGS`] headings were found;
/// the ids are assigned either way.
pub fn index(nodes: &mut [Node], ctx: &mut CompileContext<'_>) -> Option<Vec<TocEntry>> {
    let mut flat = vec![];
    collect(nodes, ctx, &mut flat);
    if flat.len() < MIN_TOC_HEADINGS {
        log::debug!("{} indexed headings, no table of contents", flat.len());
        return None;
    }
    Some(nest(flat))
}

fn collect(nodes: &mut [Node], ctx: &mut CompileContext<'_>, out: &mut Vec<TocEntry>) {
    for node in nodes {
        let Node::Block(block) = node else {
            continue;
        };
        if let Some(level) = block.kind.toc_level() {
            let id = ctx.next_chapter_id();
            block.attributes.insert("id".to_string(), id.clone());
            out.push(TocEntry {
                id,
                text: Node::plain_text(&block.children).trim().to_string(),
                level,
                children: vec![],
            });
        }
        collect(&mut block.children, ctx, out);
    }
}

/// Level-1 entries go under the most recent level-0 entry, or stay at the
/// top when there is none yet.
fn nest(flat: Vec<TocEntry>) -> Vec<TocEntry> {
    let mut out: Vec<TocEntry> = Vec::with_capacity(flat.len());
    for entry in flat {
        match out.last_mut() {
            Some(parent) if entry.level == 1 && parent.level == 0 => parent.children.push(entry),
            _ => out.push(entry),
        }
    }
    out
}
