//! Utilities for working with styled text fragments.
//!
//! A [`Span`] is a run of text with the subset of styling the report uses: bold, italic, a
//! colour and a font size. Spans are converted to [`genpdf`] styled strings only at the last
//! moment, and that conversion is where the text is folded into the single-byte repertoire
//! accepted by the builtin PDF fonts (see [`crate::encoding`]).
//!
//! [genpdf]: https://docs.rs/genpdf/

use genpdf::style::{Color, Style, StyledString};

use crate::encoding;

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
    font_size: Option<u8>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span should be rendered in italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the font size in points, if one was set.
    pub fn font_size(&self) -> Option<u8> {
        self.font_size
    }

    /// Sets the bold flag and returns the updated span.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the italic flag and returns the updated span.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Sets the span color and returns the updated span.
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Sets the font size in points and returns the updated span.
    pub fn with_font_size(mut self, size: impl Into<Option<u8>>) -> Self {
        self.font_size = size.into();
        self
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(self) -> Self {
        self.with_bold(true)
    }

    /// Convenience shorthand that marks the span as italic.
    pub fn italic(self) -> Self {
        self.with_italic(true)
    }

    /// Convenience shorthand that assigns a color to the span.
    pub fn colored(self, color: Color) -> Self {
        self.with_color(Some(color))
    }

    /// Convenience shorthand that assigns a font size to the span.
    pub fn sized(self, size: u8) -> Self {
        self.with_font_size(Some(size))
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if let Some(size) = self.font_size {
            style.set_font_size(size);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span to a [`StyledString`] with its text made safe for the builtin fonts.
    pub fn to_styled_string(&self) -> StyledString {
        let text = encoding::to_single_byte(&self.text).into_owned();
        StyledString::new(text, self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

impl From<Span> for StyledString {
    fn from(span: Span) -> Self {
        span.to_styled_string()
    }
}

/// Converts a sequence of [`Span`] values into styled strings.
pub fn spans_to_styled_strings<'a, I>(spans: I) -> Vec<StyledString>
where
    I: IntoIterator<Item = &'a Span>,
{
    spans.into_iter().map(StyledString::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Hello")
            .bold()
            .italic()
            .sized(16)
            .colored(Color::Rgb(20, 40, 100));
        let styled = span.to_styled_string();
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.font_size(), 16);
        assert_eq!(styled.style.color(), Some(Color::Rgb(20, 40, 100)));
    }

    #[test]
    fn styled_string_is_encoding_safe() {
        let styled = Span::new("Diagramme ✓ – prêt").to_styled_string();
        assert_eq!(styled.s, "Diagramme ? ? prêt");
    }

    #[test]
    fn unstyled_span_keeps_default_style() {
        let styled = Span::new("plain").to_styled_string();
        assert!(!styled.style.is_bold());
        assert!(!styled.style.is_italic());
        assert_eq!(styled.style.color(), None);
    }

    #[test]
    fn converts_sequences() {
        let spans = vec![Span::new("a").bold(), Span::new("b")];
        let strings = spans_to_styled_strings(&spans);
        assert_eq!(strings.len(), 2);
        assert!(strings[0].style.is_bold());
        assert_eq!(strings[1].s, "b");
    }
}
