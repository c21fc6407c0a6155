//! Data structures describing the logical content of the report.
//!
//! The types in this module describe *what* goes on the pages without referencing the
//! rendering crate. [`crate::builder::PdfBuilder`] turns them into [`genpdf::elements`] at
//! render time, which is also when figure files are checked for existence.

use std::path::{Path, PathBuf};

use crate::richtext::Span;

/// Horizontal alignment of paragraphs and figures.
///
/// The variants map to [`genpdf::Alignment`]. The layout engine cannot justify text, so
/// `Justified` renders as left-aligned wrapped text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Fully justified paragraphs.
    Justified,
}

impl From<HorizontalAlignment> for genpdf::Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left | HorizontalAlignment::Justified => genpdf::Alignment::Left,
            HorizontalAlignment::Center => genpdf::Alignment::Center,
            HorizontalAlignment::Right => genpdf::Alignment::Right,
        }
    }
}

/// Rich text paragraph carrying inline styling information and alignment metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans using left alignment.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Default display width of figures, in millimetres.
pub const DEFAULT_FIGURE_WIDTH_MM: f64 = 150.0;

/// A captioned image backed by a file that may be missing when the document is rendered.
///
/// Figures are always centred. When the file is absent the renderer substitutes a red
/// placeholder line naming the caption.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureBlock {
    path: PathBuf,
    caption: String,
    width_mm: f64,
}

impl FigureBlock {
    /// Creates a figure for the image at `path` using the default width.
    pub fn new(path: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            caption: caption.into(),
            width_mm: DEFAULT_FIGURE_WIDTH_MM,
        }
    }

    /// Returns the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the caption without the `Figure:` prefix.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Returns the display width in millimetres.
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Text rendered below an embedded image.
    pub fn caption_line(&self) -> String {
        format!("Figure: {}", self.caption)
    }

    /// Text rendered in place of a missing image.
    pub fn placeholder_line(&self) -> String {
        format!("[Image manquante: {}]", self.caption)
    }
}

/// Individual content blocks that make up sections and the cover.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// Fixed vertical gap in millimetres.
    Spacer(f64),
    /// Captioned image, or its placeholder.
    Figure(FigureBlock),
    /// Explicit page break request.
    PageBreak,
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Convenience helper for a single-span paragraph with the given alignment.
    pub fn line(span: Span, alignment: HorizontalAlignment) -> Self {
        Self::Paragraph(RichParagraph::new(vec![span]).with_alignment(alignment))
    }

    /// Convenience helper for a vertical gap.
    pub fn spacer(mm: f64) -> Self {
        Self::Spacer(mm)
    }

    /// Convenience helper for building a figure block.
    pub fn figure(figure: FigureBlock) -> Self {
        Self::Figure(figure)
    }

    /// Convenience helper that yields an explicit page break block.
    pub fn page_break() -> Self {
        Self::PageBreak
    }
}

/// The cover page: a title, a subtitle and free-form blocks underneath.
#[derive(Clone, Debug, PartialEq)]
pub struct Cover {
    title: String,
    subtitle: Option<String>,
    blocks: Vec<Block>,
}

impl Cover {
    /// Creates a new cover with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            blocks: Vec::new(),
        }
    }

    /// Returns the title shown on the cover page.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subtitle, if any.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Returns the content blocks rendered below the title.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Sets the subtitle and returns the updated cover.
    pub fn with_subtitle(mut self, subtitle: impl Into<Option<String>>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Extends the cover with multiple blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

/// Logical representation of a document section. Sections always start on a new page.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    number: Option<u32>,
    title: String,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates a new unnumbered section with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            number: None,
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Returns the section number shown in the heading and contents, if any.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Returns the title of the section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the heading text, `N. Title` for numbered sections.
    pub fn label(&self) -> String {
        match self.number {
            Some(number) => format!("{}. {}", number, self.title),
            None => self.title.clone(),
        }
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Sets the number and returns the updated section.
    pub fn with_number(mut self, number: impl Into<Option<u32>>) -> Self {
        self.number = number.into();
        self
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}
