//! Document construction helpers for the academic_report crate.
//!
//! [`DocumentBuilder`] configures a bare `genpdf::Document` (paper, margins, header and footer
//! callbacks), and [`PdfBuilder`] lays the [`crate::model`] types out on top of it.

use std::path::PathBuf;
use std::rc::Rc;

use genpdf::elements::{PageBreak, Paragraph};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{self, Color};
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, PaperSize, Position, Size};
use log::{debug, warn};

use crate::elements::{mm_from_f64, CaptionedImage, PageMarker, PageTracker, VerticalSpace};
use crate::encoding;
use crate::error::{ReportError, Result};
use crate::fonts;
use crate::model::{Block, Cover, FigureBlock, RichParagraph, Section};
use crate::richtext::{spans_to_styled_strings, Span};

/// Color of numbered section headings.
pub const HEADING_COLOR: Color = Color::Rgb(20, 40, 100);

/// Color of the placeholder line rendered for missing figures.
pub const PLACEHOLDER_COLOR: Color = Color::Rgb(255, 0, 0);

/// Images are shrunk so that they never exceed this height.
pub const MAX_FIGURE_HEIGHT_MM: f64 = 200.0;

const LINE_SPACING: f64 = 1.25;
const BODY_FONT_SIZE: u8 = 12;
const HEADING_FONT_SIZE: u8 = 16;
const FIGURE_TEXT_FONT_SIZE: u8 = 10;
const HEADING_GAP_MM: f64 = 4.0;
const FIGURE_GAP_MM: f64 = 5.0;
const TOC_TITLE_GAP_MM: f64 = 5.0;
const TOC_ENTRY_GAP_MM: f64 = 3.0;
const COVER_TOP_GAP_MM: f64 = 40.0;
const COVER_TITLE_GAP_MM: f64 = 10.0;
const COVER_SUBTITLE_GAP_MM: f64 = 20.0;
const COVER_TITLE_FONT_SIZE: u8 = 24;
const COVER_SUBTITLE_FONT_SIZE: u8 = 18;

type HeaderFactory = dyn Fn(usize) -> Option<Box<dyn Element>>;

/// Builder for `genpdf::Document` instances with the report's page decoration.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
    footer: Option<FooterSpec>,
    tracker: Option<Rc<PageTracker>>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Shares page numbering with [`PageMarker`] elements.
    pub fn with_page_tracker(mut self, tracker: Rc<PageTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    fn with_boxed_header(mut self, header: Option<Box<HeaderFactory>>) -> Self {
        self.header = header;
        self
    }

    fn with_footer_spec(mut self, footer: Option<FooterSpec>) -> Self {
        self.footer = footer;
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document> {
        let font_family = fonts::default_font_family().map_err(ReportError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let tracker = self.tracker.unwrap_or_default();
        let decorator =
            ConfiguredPageDecorator::new(tracker, self.margins, self.header, self.footer);
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

fn boxed_header<F, E>(header: F) -> Box<HeaderFactory>
where
    F: Fn(usize) -> Option<E> + 'static,
    E: Element + 'static,
{
    Box::new(move |page| header(page).map(|element| Box::new(element) as Box<dyn Element>))
}

/// Definition of a footer rendered through the page decorator.
pub struct FooterSpec {
    height: Mm,
    factory: Box<dyn Fn(usize) -> Box<dyn Element>>,
}

impl FooterSpec {
    /// Creates a new footer specification.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct ConfiguredPageDecorator {
    tracker: Rc<PageTracker>,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
    footer: Option<FooterSpec>,
}

impl ConfiguredPageDecorator {
    fn new(
        tracker: Rc<PageTracker>,
        margins: Option<Margins>,
        header: Option<Box<HeaderFactory>>,
        footer: Option<FooterSpec>,
    ) -> Self {
        Self {
            tracker,
            margins,
            header,
            footer,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, Error> {
        let page = self.tracker.next_page();
        debug!("Decorating page {}", page);

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        if let Some(header_cb) = &self.header {
            if let Some(mut element) = header_cb(page) {
                let result = element.render(context, area.clone(), style)?;
                area.add_offset(Position::new(0, result.size.height));
            }
        }

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - footer.height);
        }

        Ok(area)
    }
}

/// Whether a figure ended up in the document as an image or as a placeholder line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureStatus {
    /// The backing file was present and the image was embedded.
    Embedded,
    /// The backing file was absent; the placeholder line was rendered instead.
    Missing,
}

/// Outcome of a single figure block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FigureOutcome {
    pub path: PathBuf,
    pub caption: String,
    pub status: FigureStatus,
}

/// A rendered document together with layout facts gathered while rendering.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Serialized PDF.
    pub bytes: Vec<u8>,
    /// Figures in document order.
    pub figures: Vec<FigureOutcome>,
    /// 1-based page on which each section starts, in section order.
    pub section_pages: Vec<Option<usize>>,
    /// Total number of pages.
    pub page_count: usize,
}

impl RenderedPdf {
    /// Number of figures embedded as images.
    pub fn embedded_figures(&self) -> usize {
        self.figures
            .iter()
            .filter(|figure| figure.status == FigureStatus::Embedded)
            .count()
    }

    /// Placeholder lines rendered for missing figures, in document order.
    pub fn placeholders(&self) -> Vec<String> {
        self.figures
            .iter()
            .filter(|figure| figure.status == FigureStatus::Missing)
            .map(|figure| format!("[Image manquante: {}]", figure.caption))
            .collect()
    }
}

/// Lays out a cover, an optional printed table of contents and numbered sections.
///
/// The cover occupies the first page and every following part (contents, each section) starts
/// on a new page.
#[derive(Default)]
pub struct PdfBuilder {
    title: Option<String>,
    header: Option<Box<HeaderFactory>>,
    footer: Option<FooterSpec>,
    cover: Option<Cover>,
    include_printed_toc: bool,
    toc_title: Option<String>,
    sections: Vec<Section>,
}

impl PdfBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Configures a header callback; see [`DocumentBuilder::with_header`].
    pub fn with_header<F, E>(mut self, header: F) -> Self
    where
        F: Fn(usize) -> Option<E> + 'static,
        E: Element + 'static,
    {
        self.header = Some(boxed_header(header));
        self
    }

    /// Configures a footer callback; see [`DocumentBuilder::with_footer`].
    pub fn with_footer<F, E>(mut self, height: impl Into<Mm>, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height, footer));
        self
    }

    /// Sets the cover page.
    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Enables the printed table of contents listing every section label.
    pub fn include_printed_toc(mut self, include: bool) -> Self {
        self.include_printed_toc = include;
        self
    }

    /// Sets the heading of the printed table of contents.
    pub fn with_toc_title(mut self, title: Option<String>) -> Self {
        self.toc_title = title;
        self
    }

    /// Appends a section.
    pub fn add_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Labels listed by the printed table of contents.
    pub fn toc_entries(&self) -> Vec<String> {
        self.sections.iter().map(Section::label).collect()
    }

    /// Renders the document to PDF bytes.
    pub fn render(self) -> Result<RenderedPdf> {
        let tracker = PageTracker::with_slots(self.sections.len());
        let toc_entries = self.toc_entries();

        let mut document = DocumentBuilder::new()
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(10, 10, 5, 10))
            .with_page_tracker(Rc::clone(&tracker))
            .with_boxed_header(self.header)
            .with_footer_spec(self.footer)
            .build()?;

        if let Some(title) = &self.title {
            document.set_title(encoding::to_single_byte(title).into_owned());
        }
        document.set_font_size(BODY_FONT_SIZE);
        document.set_line_spacing(LINE_SPACING);

        let mut figures = Vec::new();
        let mut page_started = false;

        if let Some(cover) = &self.cover {
            push_cover(&mut document, cover, &mut figures)?;
            page_started = true;
        }

        if self.include_printed_toc {
            if page_started {
                document.push(PageBreak::new());
            }
            let title = self.toc_title.as_deref().unwrap_or("Contents");
            push_toc(&mut document, title, &toc_entries);
            page_started = true;
        }

        for (index, section) in self.sections.iter().enumerate() {
            if page_started {
                document.push(PageBreak::new());
            }
            page_started = true;

            document.push(PageMarker::new(Rc::clone(&tracker), index));
            document.push(line(
                Span::new(section.label())
                    .bold()
                    .sized(HEADING_FONT_SIZE)
                    .colored(HEADING_COLOR),
                Alignment::Left,
            ));
            document.push(VerticalSpace::new(mm_from_f64(HEADING_GAP_MM)));

            for block in section.blocks() {
                push_block(&mut document, block, &mut figures)?;
            }
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;

        Ok(RenderedPdf {
            bytes,
            figures,
            section_pages: tracker.marks(),
            page_count: tracker.current_page(),
        })
    }

    /// Renders the document and adds a PDF outline entry for every section.
    #[cfg(feature = "bookmarks")]
    pub fn render_with_bookmarks(self) -> Result<RenderedPdf> {
        let sections = self.sections.clone();
        let mut rendered = self.render()?;
        rendered.bytes = crate::bookmarks::apply_section_bookmarks(
            &rendered.bytes,
            &sections,
            &rendered.section_pages,
        )?;
        Ok(rendered)
    }
}

fn line(span: Span, alignment: Alignment) -> Paragraph {
    let mut paragraph = Paragraph::new(span);
    paragraph.set_alignment(alignment);
    paragraph
}

fn paragraph(rich: &RichParagraph) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for string in spans_to_styled_strings(rich.spans()) {
        paragraph.push(string);
    }
    paragraph.set_alignment(rich.alignment().into());
    paragraph
}

fn push_cover(
    document: &mut genpdf::Document,
    cover: &Cover,
    figures: &mut Vec<FigureOutcome>,
) -> Result<()> {
    document.push(VerticalSpace::new(mm_from_f64(COVER_TOP_GAP_MM)));
    document.push(line(
        Span::new(cover.title()).bold().sized(COVER_TITLE_FONT_SIZE),
        Alignment::Center,
    ));

    if let Some(subtitle) = cover.subtitle() {
        document.push(VerticalSpace::new(mm_from_f64(COVER_TITLE_GAP_MM)));
        document.push(line(
            Span::new(subtitle).bold().sized(COVER_SUBTITLE_FONT_SIZE),
            Alignment::Center,
        ));
    }
    document.push(VerticalSpace::new(mm_from_f64(COVER_SUBTITLE_GAP_MM)));

    for block in cover.blocks() {
        push_block(document, block, figures)?;
    }
    Ok(())
}

fn push_toc(document: &mut genpdf::Document, title: &str, entries: &[String]) {
    document.push(line(
        Span::new(title).bold().sized(HEADING_FONT_SIZE),
        Alignment::Left,
    ));
    document.push(VerticalSpace::new(mm_from_f64(TOC_TITLE_GAP_MM)));

    for entry in entries {
        document.push(line(
            Span::new(entry.as_str()).sized(BODY_FONT_SIZE),
            Alignment::Left,
        ));
        document.push(VerticalSpace::new(mm_from_f64(TOC_ENTRY_GAP_MM)));
    }
}

fn push_block(
    document: &mut genpdf::Document,
    block: &Block,
    figures: &mut Vec<FigureOutcome>,
) -> Result<()> {
    match block {
        Block::Paragraph(rich) => document.push(paragraph(rich)),
        Block::Spacer(mm) => document.push(VerticalSpace::new(mm_from_f64(*mm))),
        Block::PageBreak => document.push(PageBreak::new()),
        Block::Figure(figure) => {
            let status = push_figure(document, figure)?;
            figures.push(FigureOutcome {
                path: figure.path().to_path_buf(),
                caption: figure.caption().to_string(),
                status,
            });
        }
    }
    Ok(())
}

/// Pushes the image with its caption, or the red placeholder line when the file is absent.
fn push_figure(document: &mut genpdf::Document, figure: &FigureBlock) -> Result<FigureStatus> {
    let status = if figure.path().is_file() {
        let caption = Span::new(figure.caption_line())
            .italic()
            .sized(FIGURE_TEXT_FONT_SIZE);
        let element = CaptionedImage::from_path(figure.path(), caption)?
            .with_alignment(Alignment::Center)
            .with_width(mm_from_f64(figure.width_mm()))
            .with_max_height(mm_from_f64(MAX_FIGURE_HEIGHT_MM));
        document.push(element);
        FigureStatus::Embedded
    } else {
        warn!(
            "Figure '{}' missing at {}; rendering placeholder",
            figure.caption(),
            figure.path().display()
        );
        document.push(line(
            Span::new(figure.placeholder_line())
                .bold()
                .sized(FIGURE_TEXT_FONT_SIZE)
                .colored(PLACEHOLDER_COLOR),
            Alignment::Center,
        ));
        FigureStatus::Missing
    };

    document.push(VerticalSpace::new(mm_from_f64(FIGURE_GAP_MM)));
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toc_entries_follow_section_labels() {
        let builder = PdfBuilder::new()
            .add_section(Section::new("Introduction").with_number(1))
            .add_section(Section::new("Conception UML").with_number(4))
            .add_section(Section::new("Annexe"));
        assert_eq!(
            builder.toc_entries(),
            vec!["1. Introduction", "4. Conception UML", "Annexe"]
        );
    }

    #[test]
    fn placeholders_list_only_missing_figures() {
        let rendered = RenderedPdf {
            bytes: Vec::new(),
            figures: vec![
                FigureOutcome {
                    path: PathBuf::from("a.png"),
                    caption: "Diagramme de classes".into(),
                    status: FigureStatus::Missing,
                },
                FigureOutcome {
                    path: PathBuf::from("b.png"),
                    caption: "Diagramme de composants".into(),
                    status: FigureStatus::Embedded,
                },
            ],
            section_pages: Vec::new(),
            page_count: 0,
        };
        assert_eq!(rendered.embedded_figures(), 1);
        assert_eq!(
            rendered.placeholders(),
            vec!["[Image manquante: Diagramme de classes]"]
        );
    }
}
