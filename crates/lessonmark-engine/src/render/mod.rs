//! # Output
//!
//! Turns compiled trees back into text.
//!
//! - **`html`**: the HTML emitter with the lesson class vocabulary
//!   (`all`, `marker`, `red`, `lead`, `gazo`, ...), the TOC `<nav>` and
//!   full pages, including the page shown for a document that failed to
//!   compile.
//! - **`markup`**: writes a tree back as directive markup that parses to the
//!   same block kinds and nesting.

pub mod html;
pub mod markup;

pub use html::{render_body, render_document, render_failure, render_toc};
pub use markup::{to_markup, to_source};
