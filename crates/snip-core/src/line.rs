//! Numbered source lines.

/// A single extracted source line.
///
/// Carries the content-line number the line occupies in its file, or
/// `None` for lines spliced in by a continuation marker. Continuation
/// lines never consume a numbering slot, so the numbers of the
/// surrounding lines are unaffected by them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Content-line number, starting at 1; `None` for injected lines.
    pub number: Option<u32>,
    /// Line text without the trailing newline.
    pub text: String,
}

impl Line {
    /// Create a numbered line.
    #[must_use]
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number: Some(number),
            text: text.into(),
        }
    }

    /// Create an injected line that occupies no numbering slot.
    #[must_use]
    pub fn injected(text: impl Into<String>) -> Self {
        Self {
            number: None,
            text: text.into(),
        }
    }

    /// Return a copy with the same number and `f(text)` as text.
    ///
    /// # Example
    ///
    /// ```
    /// use snip_core::Line;
    ///
    /// let line = Line::new(3, "  body");
    /// let trimmed = line.edit(|text| text.trim_start().to_owned());
    /// assert_eq!(trimmed.number, Some(3));
    /// assert_eq!(trimmed.text, "body");
    /// ```
    #[must_use]
    pub fn edit(&self, f: impl FnOnce(&str) -> String) -> Self {
        Self {
            number: self.number,
            text: f(&self.text),
        }
    }

    /// True when the text is blank after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Count of leading whitespace characters.
    #[must_use]
    pub fn indent_width(&self) -> usize {
        self.text.chars().take_while(|c| c.is_whitespace()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_keeps_number() {
        let line = Line::new(7, "text");
        let edited = line.edit(str::to_uppercase);
        assert_eq!(edited, Line::new(7, "TEXT"));
        // the original is untouched
        assert_eq!(line.text, "text");
    }

    #[test]
    fn test_edit_keeps_injected_status() {
        let line = Line::injected("spliced");
        let edited = line.edit(|t| format!("{t}!"));
        assert_eq!(edited.number, None);
        assert_eq!(edited.text, "spliced!");
    }

    #[test]
    fn test_is_empty() {
        assert!(Line::new(1, "").is_empty());
        assert!(Line::new(1, " \t ").is_empty());
        assert!(!Line::new(1, " x ").is_empty());
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(Line::new(1, "no indent").indent_width(), 0);
        assert_eq!(Line::new(1, "    four").indent_width(), 4);
        assert_eq!(Line::new(1, "\t\tmixed").indent_width(), 2);
        assert_eq!(Line::new(1, "   ").indent_width(), 3);
    }
}
