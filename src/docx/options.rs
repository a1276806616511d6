//! Parsing options and configuration.

/// Options for reading Word packages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for optional package parts
    pub error_mode: ErrorMode,

    /// Whether to collect embedded image references
    pub extract_images: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable optional parts).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (fail on unreadable optional parts).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Read text and tables only.
    pub fn text_only(mut self) -> Self {
        self.extract_images = false;
        self
    }

    /// Whether lenient mode is active.
    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            extract_images: true,
        }
    }
}

/// Error handling mode during parsing.
///
/// Only optional parts (styles, relationships, core properties) are
/// affected; an unreadable main document part is always fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip unreadable optional parts and continue
    #[default]
    Lenient,
}
