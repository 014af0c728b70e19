//! # lessonmark engine
//!
//! Compiles lesson source text (frontmatter + directive markup) into a
//! validated document tree with resolved inline annotations, grouped media
//! blocks and a table of contents.
//!
//! ## Modules
//!
//! - **`parsing`**: the compile pipeline (`compile_document`) and the tree types
//! - **`frontmatter`**: splits the leading YAML metadata block from the body
//! - **`render`**: HTML emitter and markup serializer for compiled trees
//! - **`io`**: lesson lookup on disk by subject and number
//! - **`batch`**: parallel compilation of many documents
//! - **`error`**: fatal compile errors

pub mod batch;
pub mod error;
pub mod frontmatter;
pub mod io;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

pub use batch::compile_all;
pub use error::{CompileError, UnclosedOpen};
pub use frontmatter::Frontmatter;
pub use io::{IoError, LessonRef};
pub use parsing::{
    CompileOptions, CompiledDocument, Node, compile_document,
    blocks::{BlockKind, BlockNode},
    inline::InlineSpan,
    media::{AssetResolver, MediaImage, MediaNode, MediaVariant, SizeVariant},
    toc::TocEntry,
};
