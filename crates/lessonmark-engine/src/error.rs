use std::fmt;

use thiserror::Error;

/// A directive that was opened but never closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclosedOpen {
    /// Directive name as written after `:::`.
    pub name: String,
    /// 1-based line of the opening `:::name`.
    pub line: usize,
}

impl fmt::Display for UnclosedOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":::{} (line {})", self.name, self.line)
    }
}

/// Fatal errors that abort compilation of a document. No partial tree is
/// ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unclosed directive: {}", join_opens(.open))]
    UnclosedDirective { open: Vec<UnclosedOpen> },

    #[error("line {line}: `:::` has no open directive to close")]
    UnexpectedClose { line: usize },

    #[error("invalid frontmatter: {0}")]
    Frontmatter(String),
}

impl CompileError {
    /// Every source line this error points at, in ascending order.
    pub fn lines(&self) -> Vec<usize> {
        match self {
            CompileError::UnclosedDirective { open } => open.iter().map(|o| o.line).collect(),
            CompileError::UnexpectedClose { line } => vec![*line],
            CompileError::Frontmatter(_) => vec![],
        }
    }
}

fn join_opens(open: &[UnclosedOpen]) -> String {
    open.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
