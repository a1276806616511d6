//! Rendering options and configuration.

/// Base name used when no output name is given.
pub const DEFAULT_BASE_NAME: &str = "document";

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Base name of the output Markdown file; the media folder is `<base>_media`
    pub base_name: Option<String>,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output base name.
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = Some(base_name.into());
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Output base name, `document` when unset.
    pub fn base_name(&self) -> &str {
        self.base_name.as_deref().unwrap_or(DEFAULT_BASE_NAME)
    }

    /// Media folder name referenced from image links.
    pub fn media_dir(&self) -> String {
        format!("{}_media", self.base_name())
    }
}
