use std::fmt;

use super::media::AssetResolver;

/// Image file names that stand in for a not-yet-available picture.
pub const DEFAULT_PLACEHOLDER_IMAGES: &[&str] = &[
    "loading.gif",
    "loading.svg",
    "now_loading.png",
    "placeholder.png",
];

/// Caller-supplied settings shared read-only by every compile.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub assets: AssetResolver,
    /// File names (last path segment) of placeholder images to drop.
    pub placeholder_images: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            assets: AssetResolver::default(),
            placeholder_images: DEFAULT_PLACEHOLDER_IMAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CompileOptions {
    pub fn is_placeholder(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        self.placeholder_images
            .iter()
            .any(|p| p.eq_ignore_ascii_case(file_name))
    }
}

/// Counters for events that are handled in place rather than reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub unterminated_inline: usize,
    pub dropped_placeholders: usize,
    pub headings: usize,
}

impl fmt::Display for CompileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} headings, {} unterminated inline constructs, {} placeholder images dropped",
            self.headings, self.unterminated_inline, self.dropped_placeholders
        )
    }
}

/// State owned by a single compile call.
///
/// Created fresh in [`compile_document`](super::compile_document) and
/// dropped when it returns; nothing here is shared between documents.
#[derive(Debug)]
pub struct CompileContext<'a> {
    options: &'a CompileOptions,
    stats: CompileStats,
}

impl<'a> CompileContext<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            stats: CompileStats::default(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        self.options
    }

    pub fn stats(&self) -> CompileStats {
        self.stats
    }

    /// Returns the next `chapter-N` id, starting at `chapter-1`.
    pub fn next_chapter_id(&mut self) -> String {
        self.stats.headings += 1;
        format!("chapter-{}", self.stats.headings)
    }

    pub(crate) fn note_unterminated(&mut self, token: &str) {
        self.stats.unterminated_inline += 1;
        log::debug!("unterminated inline `{token}` left as literal text");
    }

    pub(crate) fn note_dropped_placeholder(&mut self, path: &str) {
        self.stats.dropped_placeholders += 1;
        log::debug!("dropped placeholder image `{path}`");
    }
}
