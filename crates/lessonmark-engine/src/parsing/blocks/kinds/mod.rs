//! # Block Kinds
//!
//! Each type here owns the syntax of one line-level construct: its delimiter
//! constants and the function that recognizes it. The classifier calls
//! these; it never hardcodes `:::` or `#` itself.
//!
//! - **`Directive`**: `:::name{attrs}` containers, `::name{attrs}` leaves, `:::` closes
//! - **`attributes`**: the `{key="value" .class #id}` attribute block
//! - **`Heading`**: `##` headings
//! - **`ListItem`**: `- item`, `* item`, `1. item`
//! - **`ImageLine`**: a line that is exactly `![alt](path)`

pub mod attributes;
pub mod directive;
pub mod heading;
pub mod image;
pub mod list_item;

pub use directive::{Directive, DirectiveFence, DirectiveOpen};
pub use heading::Heading;
pub use image::ImageLine;
pub use list_item::ListItem;
