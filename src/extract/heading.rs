//! Heading-level detection as an ordered rule cascade.

use crate::source::{SourceDocument, SourceParagraph};

/// Inputs the heading rules inspect for one paragraph.
#[derive(Debug, Clone, Copy)]
pub struct HeadingInput<'a> {
    /// Paragraph style display name
    pub style_name: Option<&'a str>,
    /// Full paragraph text
    pub text: &'a str,
    /// Run texts with their boldness, in order
    pub runs: &'a [(&'a str, bool)],
    /// Font size of the first run in points
    pub first_run_size: Option<f32>,
}

/// One rule of the heading cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// Style name "Heading N" gives level N (1 when N is unreadable).
    StyleHeading,
    /// Style name containing "subtitle" gives 2, "title" gives 1.
    StyleTitle,
    /// Every non-whitespace run bold: level from size or text shape.
    AllBold,
    /// First run bold and equal to the trimmed paragraph text.
    ///
    /// When the paragraph text is the concatenation of its runs, any input
    /// this matches is also matched by [`AllBold`](Self::AllBold), so in the
    /// default order it only decides for detectors that omit `AllBold`.
    BoldLeadRun,
}

impl HeadingRule {
    /// Evaluate the rule; `None` when it does not apply.
    pub fn apply(&self, input: &HeadingInput<'_>) -> Option<u8> {
        match self {
            HeadingRule::StyleHeading => {
                let rest = input.style_name?.strip_prefix("Heading")?;
                let level = rest.trim().parse::<u8>().unwrap_or(1);
                Some(level.clamp(1, 6))
            }
            HeadingRule::StyleTitle => {
                let style = input.style_name?.to_lowercase();
                if style.contains("subtitle") {
                    Some(2)
                } else if style.contains("title") {
                    Some(1)
                } else {
                    None
                }
            }
            HeadingRule::AllBold => {
                if input.text.trim().is_empty() {
                    return None;
                }
                let all_bold = input
                    .runs
                    .iter()
                    .filter(|(text, _)| !text.trim().is_empty())
                    .all(|(_, bold)| *bold);
                all_bold.then(|| level_from_shape(input.first_run_size, input.text))
            }
            HeadingRule::BoldLeadRun => {
                let (first, bold) = input.runs.first()?;
                let matches = *bold && !first.is_empty() && *first == input.text.trim();
                matches.then(|| level_from_shape(input.first_run_size, input.text))
            }
        }
    }
}

/// Level from font size, or from the text itself when no size is known.
pub fn level_from_shape(size: Option<f32>, text: &str) -> u8 {
    match size {
        Some(size) if size >= 20.0 => 1,
        Some(size) if size >= 16.0 => 2,
        Some(size) if size >= 14.0 => 3,
        Some(_) => 4,
        None if is_all_caps(text) => 1,
        None if text.trim().chars().count() <= 20 => 2,
        None => 3,
    }
}

fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// Ordered list of heading rules; the first rule that applies wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingDetector {
    rules: Vec<HeadingRule>,
}

impl HeadingDetector {
    /// Detector with the given rules, evaluated in order.
    pub fn new(rules: Vec<HeadingRule>) -> Self {
        Self { rules }
    }

    /// Only trust paragraph styles.
    pub fn style_only() -> Self {
        Self::new(vec![HeadingRule::StyleHeading, HeadingRule::StyleTitle])
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }

    /// Heading level for the input, 0 when no rule applies.
    pub fn detect(&self, input: &HeadingInput<'_>) -> u8 {
        for rule in &self.rules {
            if let Some(level) = rule.apply(input) {
                log::debug!("Heading rule {:?} gave level {}", rule, level);
                return level;
            }
        }
        0
    }

    /// Heading level of a source paragraph.
    pub fn detect_paragraph<S: SourceDocument + ?Sized>(
        &self,
        source: &S,
        paragraph: &SourceParagraph,
        text: &str,
    ) -> u8 {
        let runs: Vec<(&str, bool)> = paragraph
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.bold))
            .collect();
        let first_run_size = paragraph
            .runs
            .first()
            .and_then(|run| source.font_size_points(run));

        self.detect(&HeadingInput {
            style_name: paragraph.style_name.as_deref(),
            text,
            runs: &runs,
            first_run_size,
        })
    }
}

impl Default for HeadingDetector {
    fn default() -> Self {
        Self::new(vec![
            HeadingRule::StyleHeading,
            HeadingRule::StyleTitle,
            HeadingRule::AllBold,
            HeadingRule::BoldLeadRun,
        ])
    }
}
