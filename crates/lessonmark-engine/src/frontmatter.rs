//! Frontmatter splitting.
//!
//! A lesson may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: 旧石器時代
//! overview: 日本列島に人が住み始めた頃
//! ---
//! ## 本文
//! ```
//!
//! Everything after the closing fence is the markup body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Lesson metadata from the leading YAML block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Any other keys, kept verbatim for the rendering layer.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Result of [`split`]: the metadata and the body that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
    /// 1-based source line on which `body` starts.
    pub body_line: usize,
}

pub const FENCE: &str = "---";

/// Splits `source` into frontmatter and body.
///
/// Without a leading fence, or when the block is never closed, the whole
/// source is the body and the frontmatter is empty.
pub fn split(source: &str) -> Result<Split<'_>, CompileError> {
    let no_frontmatter = Split {
        frontmatter: Frontmatter::default(),
        body: source,
        body_line: 1,
    };

    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(no_frontmatter);
    };
    if first.trim_end() != FENCE {
        return Ok(no_frontmatter);
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for (i, line) in lines.enumerate() {
        if line.trim_end() == FENCE {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            return Ok(Split {
                frontmatter: parse_yaml(yaml)?,
                body,
                // fence line + i yaml lines + closing fence
                body_line: i + 3,
            });
        }
        offset += line.len();
    }

    log::debug!("frontmatter fence is never closed; treating it as body text");
    Ok(no_frontmatter)
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, CompileError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| CompileError::Frontmatter(e.to_string()))
}
