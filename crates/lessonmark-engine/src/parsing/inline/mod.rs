//! # Inline Expansion
//!
//! Expands the inline micro-syntax of text-bearing nodes into a tree of
//! [`InlineSpan`]s.
//!
//! ## Architecture
//!
//! Expansion runs over *sequences of sibling spans*, not single strings: one
//! construct at a time, in precedence order. Each construct scans the `Text`
//! spans for its opener and searches forward, across later siblings, for
//! the closer. Everything in between (including spans built by an earlier
//! construct) becomes the new span's children, which are then expanded with
//! the constructs of lower precedence.
//!
//! ## Precedence (outer to inner)
//!
//! 1. `==marker==`
//! 2. `**emphasis**`
//! 3. `{{base|reading}}` ruby
//! 4. `[[base|reading]]` term with reading, `[[text]]` term
//!
//! An opener without a closer, or an empty construct, stays literal text.
//!
//! ## Modules
//!
//! - **`types`**: `InlineSpan`
//! - **`kinds`**: delimiter owners and span builders per construct
//! - **`expand`**: the scanner (`expand_inline`, `expand_tree`)

pub mod expand;
pub mod kinds;
pub mod types;

pub use expand::{expand_inline, expand_tree};
pub use kinds::Construct;
pub use types::InlineSpan;
