use std::collections::BTreeMap;

use serde::Serialize;

use crate::parsing::node::Node;

/// The kind of a block node.
///
/// Directive names map 1:1 onto the named variants; any other name is kept
/// verbatim in [`BlockKind::Directive`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum BlockKind {
    Top,
    Middle,
    Last,
    Sup,
    Lead,
    Gazo,
    GazoCenter,
    Explanation,
    List,
    Arrow,
    /// A `#`-prefixed heading; `depth` is the number of `#`.
    Heading { depth: u8 },
    Paragraph,
    /// Consecutive `- item` / `1. item` lines. Each item is a paragraph child.
    RawList { ordered: bool },
    /// A directive with a name outside the known vocabulary.
    Directive { name: String },
}

impl BlockKind {
    pub fn from_directive_name(name: &str) -> Self {
        match name {
            "top" => BlockKind::Top,
            "middle" => BlockKind::Middle,
            "last" => BlockKind::Last,
            "sup" => BlockKind::Sup,
            "lead" => BlockKind::Lead,
            "gazo" => BlockKind::Gazo,
            "gazo-center" => BlockKind::GazoCenter,
            "explanation" => BlockKind::Explanation,
            "list" => BlockKind::List,
            "arrow" => BlockKind::Arrow,
            other => BlockKind::Directive {
                name: other.to_string(),
            },
        }
    }

    /// The directive name this kind is written with, or `None` for blocks
    /// that are not directives (headings, paragraphs, lists).
    pub fn directive_name(&self) -> Option<&str> {
        Some(match self {
            BlockKind::Top => "top",
            BlockKind::Middle => "middle",
            BlockKind::Last => "last",
            BlockKind::Sup => "sup",
            BlockKind::Lead => "lead",
            BlockKind::Gazo => "gazo",
            BlockKind::GazoCenter => "gazo-center",
            BlockKind::Explanation => "explanation",
            BlockKind::List => "list",
            BlockKind::Arrow => "arrow",
            BlockKind::Directive { name } => name.as_str(),
            BlockKind::Heading { .. } | BlockKind::Paragraph | BlockKind::RawList { .. } => {
                return None;
            }
        })
    }

    /// `top`, `middle`, `last` and `sup`: the section family a `lead` may
    /// share a closing `:::` with.
    pub fn is_section(&self) -> bool {
        matches!(
            self,
            BlockKind::Top | BlockKind::Middle | BlockKind::Last | BlockKind::Sup
        )
    }

    /// Kinds the flattener promotes to siblings when nested in one another.
    pub fn is_flattenable(&self) -> bool {
        self.is_section() || *self == BlockKind::Lead
    }

    pub fn is_gazo(&self) -> bool {
        matches!(self, BlockKind::Gazo | BlockKind::GazoCenter)
    }

    /// TOC level for indexed headings: `##` is 0, `###` is 1.
    pub fn toc_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading { depth: 2 } => Some(0),
            BlockKind::Heading { depth: 3 } => Some(1),
            _ => None,
        }
    }
}

/// A parsed block with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// 1-based source line the block starts on.
    pub line: usize,
}

impl BlockNode {
    pub fn new(kind: BlockKind, line: usize) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            children: vec![],
            line,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Child blocks, skipping inline and media children.
    pub fn child_blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.children.iter().filter_map(Node::as_block)
    }
}
