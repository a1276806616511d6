//! Paragraph and run types.

use serde::{Deserialize, Serialize};

/// A plain (non-heading) paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Full paragraph text
    pub text: String,

    /// Non-empty runs in source order (may be empty)
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a paragraph with text and runs.
    pub fn new(text: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            text: text.into(),
            runs,
        }
    }

    /// Create a paragraph with plain text and no runs.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Append a run. Empty runs are dropped.
    pub fn add_run(&mut self, run: Run) {
        if !run.is_empty() {
            self.runs.push(run);
        }
    }

    /// Check if the paragraph has any runs.
    pub fn has_runs(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Check if the paragraph text is blank.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A run of text with flat formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run text
    pub text: String,

    /// Formatting flags
    #[serde(flatten)]
    pub style: RunStyle,
}

impl Run {
    /// Create an unformatted run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a run with the given style.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::new().with_bold(true))
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::new().with_italic(true))
    }

    /// Check if the run has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if any formatting flag is set.
    pub fn has_formatting(&self) -> bool {
        self.style.has_formatting()
    }
}

/// The four independent formatting flags a run may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strike: bool,
}

impl RunStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Set strikethrough.
    pub fn with_strike(mut self, strike: bool) -> Self {
        self.strike = strike;
        self
    }

    /// Check if any flag is set.
    pub fn has_formatting(&self) -> bool {
        self.bold || self.italic || self.underline || self.strike
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_run_skips_empty() {
        let mut p = Paragraph::with_text("Hello");
        p.add_run(Run::new(""));
        p.add_run(Run::bold("Hello"));
        assert_eq!(p.runs.len(), 1);
        assert!(p.has_runs());
    }

    #[test]
    fn test_run_style() {
        let style = RunStyle::new().with_underline(true).with_strike(true);
        assert!(style.has_formatting());
        assert!(!style.bold);
        assert!(!RunStyle::default().has_formatting());
        assert!(Run::italic("x").has_formatting());
        assert!(!Run::new("x").has_formatting());
    }

    #[test]
    fn test_blank_paragraph() {
        assert!(Paragraph::with_text(" \t\n").is_blank());
        assert!(!Paragraph::with_text(" a ").is_blank());
    }
}
