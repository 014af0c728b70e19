use std::collections::HashMap;

use crate::{
    error::{CompileError, UnclosedOpen},
    parsing::{inline::InlineSpan, node::Node},
};

use super::{
    classify::{LineClass, LineKind},
    kinds::{DirectiveFence, DirectiveOpen},
    types::{BlockKind, BlockNode},
};

/// The leaf block currently accumulating lines, if any.
#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        line: usize,
        parts: Vec<InlineSpan>,
    },
    List {
        line: usize,
        ordered: bool,
        items: Vec<ListItemBuf>,
    },
}

#[derive(Debug)]
struct ListItemBuf {
    line: usize,
    parts: Vec<InlineSpan>,
}

/// An open `:::name` container and the children collected so far.
#[derive(Debug)]
struct OpenFrame {
    name: String,
    node: BlockNode,
}

/// Phase 2 of block parsing: turns classified lines into a block tree.
///
/// Keeps an explicit stack of open directive containers. Leaf blocks
/// (paragraphs, lists) accumulate in `leaf` and are flushed into the
/// innermost open container, or the top level, whenever a structural line
/// arrives.
pub struct BlockBuilder {
    stack: Vec<OpenFrame>,
    leaf: LeafState,
    out: Vec<Node>,
    /// `parent_has_own_close` results, keyed by the number of lines left.
    own_close: HashMap<usize, bool>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![],
            leaf: LeafState::None,
            out: vec![],
            own_close: HashMap::new(),
        }
    }

    /// Feeds one line. `rest` is every line after it, used only to decide
    /// whether a `lead` shares its parent's closing `:::`.
    pub fn push(&mut self, c: &LineClass, rest: &[LineClass]) -> Result<(), CompileError> {
        match &c.kind {
            LineKind::Blank => self.flush_leaf(),
            LineKind::Close => {
                self.flush_leaf();
                self.close(c.number, rest)?;
            }
            LineKind::Open(open) => {
                self.flush_leaf();
                self.open(open, c.number);
            }
            LineKind::Heading { depth, text } => {
                self.flush_leaf();
                let heading = BlockNode::new(BlockKind::Heading { depth: *depth }, c.number)
                    .with_children(vec![Node::Inline(InlineSpan::text(text.as_str()))]);
                self.attach(heading);
            }
            LineKind::ListItem { ordered, text } => {
                self.push_list_item(*ordered, text, c.number);
            }
            LineKind::Image { alt, src } => {
                self.extend_paragraph(
                    InlineSpan::Image {
                        alt: alt.clone(),
                        src: src.clone(),
                    },
                    c.number,
                );
            }
            LineKind::Text(text) => {
                if c.indent > 0 && self.continue_list_item(text) {
                    return Ok(());
                }
                self.extend_paragraph(InlineSpan::text(text.as_str()), c.number);
            }
        }
        Ok(())
    }

    /// End of input: flushes pending leaves and fails if any directive is
    /// still open.
    pub fn finish(mut self) -> Result<Vec<Node>, CompileError> {
        self.flush_leaf();
        if !self.stack.is_empty() {
            let open = self
                .stack
                .iter()
                .map(|f| UnclosedOpen {
                    name: f.name.clone(),
                    line: f.node.line,
                })
                .collect();
            return Err(CompileError::UnclosedDirective { open });
        }
        Ok(self.out)
    }

    fn open(&mut self, open: &DirectiveOpen, line: usize) {
        let mut node = BlockNode::new(BlockKind::from_directive_name(&open.name), line);
        node.attributes = open.attributes.clone();
        match open.fence {
            DirectiveFence::Leaf => self.attach(node),
            DirectiveFence::Container => self.stack.push(OpenFrame {
                name: open.name.clone(),
                node,
            }),
        }
    }

    fn close(&mut self, line: usize, rest: &[LineClass]) -> Result<(), CompileError> {
        let frame = self
            .stack
            .pop()
            .ok_or(CompileError::UnexpectedClose { line })?;

        let closes_parent = frame.node.kind == BlockKind::Lead
            && self
                .stack
                .last()
                .is_some_and(|parent| parent.node.kind.is_section())
            && !parent_has_own_close(rest, &mut self.own_close);

        self.attach(unwrap_paragraphs(frame.node));

        if closes_parent && let Some(parent) = self.stack.pop() {
            log::trace!(
                "line {line}: `:::` closes :::lead and its parent :::{}",
                parent.name
            );
            self.attach(unwrap_paragraphs(parent.node));
        }
        Ok(())
    }

    /// Adds a finished block to the innermost open container, or the top level.
    fn attach(&mut self, block: BlockNode) {
        self.children_mut().push(Node::Block(block));
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.node.children,
            None => &mut self.out,
        }
    }

    fn extend_paragraph(&mut self, part: InlineSpan, line: usize) {
        if let LeafState::Paragraph { parts, .. } = &mut self.leaf {
            parts.push(InlineSpan::LineBreak);
            parts.push(part);
            return;
        }
        self.flush_leaf();
        self.leaf = LeafState::Paragraph {
            line,
            parts: vec![part],
        };
    }

    fn push_list_item(&mut self, ordered: bool, text: &str, line: usize) {
        let item = ListItemBuf {
            line,
            parts: vec![InlineSpan::text(text)],
        };
        if let LeafState::List {
            ordered: current,
            items,
            ..
        } = &mut self.leaf
            && *current == ordered
        {
            items.push(item);
            return;
        }
        self.flush_leaf();
        self.leaf = LeafState::List {
            line,
            ordered,
            items: vec![item],
        };
    }

    /// Appends an indented line to the last list item. Returns false when no
    /// list is open.
    fn continue_list_item(&mut self, text: &str) -> bool {
        let LeafState::List { items, .. } = &mut self.leaf else {
            return false;
        };
        let Some(item) = items.last_mut() else {
            return false;
        };
        item.parts.push(InlineSpan::LineBreak);
        item.parts.push(InlineSpan::text(text));
        true
    }

    fn flush_leaf(&mut self) {
        let block = match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => return,
            LeafState::Paragraph { line, parts } => paragraph(line, parts),
            LeafState::List {
                line,
                ordered,
                items,
            } => {
                let items = items
                    .into_iter()
                    .map(|item| Node::Block(paragraph(item.line, item.parts)))
                    .collect();
                BlockNode::new(BlockKind::RawList { ordered }, line).with_children(items)
            }
        };
        self.attach(block);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn paragraph(line: usize, parts: Vec<InlineSpan>) -> BlockNode {
    BlockNode::new(BlockKind::Paragraph, line)
        .with_children(parts.into_iter().map(Node::Inline).collect())
}

/// Whether a section that stays open after its `lead` closes gets a `:::` of
/// its own later on.
///
/// Replays the remaining lines on a local stack whose bottom entry stands for
/// that section. A later `lead` closing inside a section is settled by the
/// same question asked about the lines after it, so a run of sections that
/// share their lead's close can end in one that is closed explicitly.
fn parent_has_own_close(rest: &[LineClass], memo: &mut HashMap<usize, bool>) -> bool {
    if let Some(&known) = memo.get(&rest.len()) {
        return known;
    }
    let mut stack = vec![BlockKind::Top];
    let mut found = false;
    for (i, line) in rest.iter().enumerate() {
        match &line.kind {
            LineKind::Open(open) if open.fence == DirectiveFence::Container => {
                stack.push(BlockKind::from_directive_name(&open.name));
            }
            LineKind::Close => {
                let closed = stack.pop();
                if closed == Some(BlockKind::Lead)
                    && stack.last().is_some_and(BlockKind::is_section)
                    && !parent_has_own_close(&rest[i + 1..], memo)
                {
                    stack.pop();
                }
                if stack.is_empty() {
                    found = true;
                    break;
                }
            }
            _ => {}
        }
    }
    memo.insert(rest.len(), found);
    found
}

/// Replaces a container's immediate paragraph children with their inline
/// content. Consecutive unwrapped paragraphs are kept apart by a line break.
fn unwrap_paragraphs(mut node: BlockNode) -> BlockNode {
    let mut children = Vec::with_capacity(node.children.len());
    let mut prev_unwrapped = false;
    for child in std::mem::take(&mut node.children) {
        match child {
            Node::Block(b) if b.kind == BlockKind::Paragraph => {
                if prev_unwrapped {
                    children.push(Node::Inline(InlineSpan::LineBreak));
                }
                children.extend(b.children);
                prev_unwrapped = true;
            }
            other => {
                children.push(other);
                prev_unwrapped = false;
            }
        }
    }
    node.children = children;
    node
}
