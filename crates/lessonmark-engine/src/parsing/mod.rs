//! # Compile pipeline
//!
//! Source text flows strictly forward through these stages:
//!
//! 1. **`source`**: newline normalization
//! 2. **`frontmatter`** (crate root): metadata split
//! 3. **`blocks`**: line classification and directive tree building
//! 4. **`flatten`**: nested `top/middle/last/sup/lead` become flat siblings
//! 5. **`inline`**: term, marker, emphasis and ruby expansion
//! 6. **`media`**: `gazo` blocks become media nodes, explanations merge into captions
//! 7. **`toc`**: `chapter-N` ids and the table of contents
//!
//! All per-document state lives in a [`CompileContext`] created for the call,
//! so documents can be compiled concurrently without interfering.

pub mod blocks;
pub mod context;
pub mod cursor;
pub mod flatten;
pub mod inline;
pub mod media;
pub mod node;
pub mod source;
pub mod toc;

use serde::Serialize;

use crate::{
    error::CompileError,
    frontmatter::{self, Frontmatter},
};

pub use context::{CompileContext, CompileOptions, CompileStats};
pub use node::Node;

use blocks::{BlockBuilder, LineClassifier};
use toc::TocEntry;

/// The output of a successful compile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledDocument {
    pub frontmatter: Frontmatter,
    pub body: Vec<Node>,
    /// Present only when the document has at least
    /// [`toc::MIN_TOC_HEADINGS`] indexed headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<Vec<TocEntry>>,
}

/// Compiles one lesson source into a [`CompiledDocument`].
pub fn compile_document(
    source: &str,
    options: &CompileOptions,
) -> Result<CompiledDocument, CompileError> {
    let source = source::normalize(source);
    let split = frontmatter::split(&source)?;
    let mut ctx = CompileContext::new(options);

    let body = parse_blocks(split.body, split.body_line)?;
    let body = flatten::flatten(body);
    let body = inline::expand_tree(body, &mut ctx);
    let mut body = media::resolve(body, &mut ctx);
    let toc = toc::index(&mut body, &mut ctx);

    log::debug!(
        "compiled document: {} top-level nodes, {}",
        body.len(),
        ctx.stats()
    );

    Ok(CompiledDocument {
        frontmatter: split.frontmatter,
        body,
        toc,
    })
}

/// Runs the block parser alone over an already split body.
///
/// `first_line` is the 1-based source line of the body's first line, used
/// for error reporting.
pub fn parse_blocks(body: &str, first_line: usize) -> Result<Vec<Node>, CompileError> {
    let classifier = LineClassifier;
    let lines: Vec<_> = body
        .lines()
        .enumerate()
        .map(|(i, text)| classifier.classify(first_line + i, text))
        .collect();

    let mut builder = BlockBuilder::new();
    for (i, line) in lines.iter().enumerate() {
        builder.push(line, &lines[i + 1..])?;
    }
    builder.finish()
}
