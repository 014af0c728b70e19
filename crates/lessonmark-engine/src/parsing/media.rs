//! Media resolution.
//!
//! `gazo` and `gazo-center` blocks become [`MediaNode`]s: their images are
//! collected in order, every other inline child becomes the caption, and an
//! `explanation` block right after the directive is folded into that caption.

use relative_path::RelativePath;
use serde::Serialize;

use super::{
    blocks::{BlockKind, BlockNode},
    context::CompileContext,
    inline::InlineSpan,
    node::Node,
};

/// Display size requested with the `size` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeVariant {
    #[default]
    None,
    Half,
    Twice,
    Quarter,
}

impl SizeVariant {
    /// Unknown values fall back to [`SizeVariant::None`].
    pub fn from_attribute(value: &str) -> Self {
        match value.trim() {
            "half" => SizeVariant::Half,
            "twice" => SizeVariant::Twice,
            "quarter" => SizeVariant::Quarter,
            _ => SizeVariant::None,
        }
    }

    pub fn as_str(self) -> Option<&'static str> {
        match self {
            SizeVariant::None => None,
            SizeVariant::Half => Some("half"),
            SizeVariant::Twice => Some("twice"),
            SizeVariant::Quarter => Some("quarter"),
        }
    }

    /// `size-half`, `size-twice`, `size-quarter`.
    pub fn class(self) -> Option<String> {
        self.as_str().map(|s| format!("size-{s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaVariant {
    Gazo,
    GazoCenter,
}

impl MediaVariant {
    pub fn class(self) -> &'static str {
        match self {
            MediaVariant::Gazo => "gazo",
            MediaVariant::GazoCenter => "gazo-center",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaImage {
    pub path: String,
    pub alt: String,
    pub size: SizeVariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaNode {
    pub variant: MediaVariant,
    /// The directive's `size`, kept even when every image was dropped.
    pub size: SizeVariant,
    pub images: Vec<MediaImage>,
    pub caption: Vec<InlineSpan>,
    pub line: usize,
}

/// Maps image references in lesson sources to the URLs the output uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
    base_url: Option<String>,
}

impl AssetResolver {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|b| b.trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty());
        Self { base_url }
    }

    /// Joins a relative reference onto the base URL.
    ///
    /// Absolute URLs and `data:` URIs are returned as is, as is every path
    /// when no base URL is configured.
    pub fn resolve(&self, path: &str) -> String {
        let Some(base) = &self.base_url else {
            return path.to_string();
        };
        if is_absolute_url(path) {
            return path.to_string();
        }
        let relative = RelativePath::new(path.trim_start_matches('/')).normalize();
        format!("{base}/{relative}")
    }
}

fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("data:") || path.starts_with("//") {
        return true;
    }
    path.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Replaces media directives with [`MediaNode`]s, recursing into containers.
pub fn resolve(nodes: Vec<Node>, ctx: &mut CompileContext<'_>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();
    while let Some(node) = iter.next() {
        match node {
            Node::Block(block) if block.kind.is_gazo() => {
                let mut media = media_node(block, ctx);
                if let Some(Node::Block(explanation)) = iter.next_if(is_explanation) {
                    media.absorb(explanation);
                }
                out.push(Node::Media(media));
            }
            Node::Block(mut block) => {
                block.children = resolve(block.children, ctx);
                out.push(Node::Block(block));
            }
            other => out.push(other),
        }
    }
    out
}

fn is_explanation(node: &Node) -> bool {
    matches!(node, Node::Block(b) if b.kind == BlockKind::Explanation)
}

fn media_node(block: BlockNode, ctx: &mut CompileContext<'_>) -> MediaNode {
    let variant = match block.kind {
        BlockKind::GazoCenter => MediaVariant::GazoCenter,
        _ => MediaVariant::Gazo,
    };
    let size = block
        .attribute("size")
        .map(SizeVariant::from_attribute)
        .unwrap_or_default();

    let mut images = vec![];
    if let Some(src) = block.attribute("src") {
        let alt = block.attribute("alt").unwrap_or_default();
        push_image(&mut images, src, alt, size, ctx);
    }

    let mut rest = Vec::with_capacity(block.children.len());
    for child in block.children {
        match child {
            Node::Inline(InlineSpan::Image { alt, src }) => {
                push_image(&mut images, &src, &alt, size, ctx);
            }
            other => rest.push(other),
        }
    }

    MediaNode {
        variant,
        size,
        images,
        caption: inline_content(rest),
        line: block.line,
    }
}

fn push_image(
    images: &mut Vec<MediaImage>,
    src: &str,
    alt: &str,
    size: SizeVariant,
    ctx: &mut CompileContext<'_>,
) {
    if ctx.options().is_placeholder(src) {
        ctx.note_dropped_placeholder(src);
        return;
    }
    images.push(MediaImage {
        path: ctx.options().assets.resolve(src),
        alt: alt.to_string(),
        size,
    });
}

impl MediaNode {
    /// Appends an explanation block's content to the caption.
    fn absorb(&mut self, explanation: BlockNode) {
        let spans = inline_content(explanation.children);
        if spans.is_empty() {
            return;
        }
        if !self.caption.is_empty() {
            self.caption.push(InlineSpan::LineBreak);
        }
        self.caption.extend(spans);
    }
}

/// Caption spans from mixed children. Nested blocks, and each item of a
/// nested list, keep their inline spans on a line of their own.
fn inline_content(children: Vec<Node>) -> Vec<InlineSpan> {
    let mut spans = vec![];
    for child in children {
        match child {
            Node::Inline(span) => spans.push(span),
            Node::Block(block) => {
                spans.push(InlineSpan::LineBreak);
                spans.extend(inline_content(block.children));
                spans.push(InlineSpan::LineBreak);
            }
            Node::Media(media) => spans.extend(media.caption),
        }
    }
    tidy_breaks(spans)
}

/// Drops leading, trailing and repeated line breaks left behind by removed
/// images.
fn tidy_breaks(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    let mut out: Vec<InlineSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        let is_break = span == InlineSpan::LineBreak;
        if is_break && matches!(out.last(), None | Some(InlineSpan::LineBreak)) {
            continue;
        }
        out.push(span);
    }
    if out.last() == Some(&InlineSpan::LineBreak) {
        out.pop();
    }
    out
}
