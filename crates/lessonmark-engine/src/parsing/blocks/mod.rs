//! # Block Parsing
//!
//! Two-phase block parsing over an explicit stack of open directives.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding only local facts (directive open/close/leaf,
//!    heading, list item, image, text, blank, indentation)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps the stack of
//!    open directives and emits `BlockNode`s as they close
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `BlockKind`
//! - **`kinds`**: syntax owners (directive fences, attributes, headings, list
//!   items, image lines)
//! - **`classify`**: `LineClassifier` produces a `LineClass` per line
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Every `:::name` has exactly one `:::`; leftovers at end of input are a
//!   fatal `UnclosedDirective` listing every open line
//! - `lead` directly inside `top/middle/last/sup` may share its parent's close
//! - Directive containers never hold paragraph blocks; paragraphs are
//!   unwrapped into inline children

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineClassifier, LineKind};
pub use types::{BlockKind, BlockNode};
