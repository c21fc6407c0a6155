//! Assembles the mini-project report from [`crate::content`] and writes it to disk.

use std::fs;

use genpdf::elements::{LinearLayout, Paragraph};
use genpdf::Alignment;
use log::info;

use crate::builder::{PdfBuilder, RenderedPdf};
use crate::config::ReportConfig;
use crate::content::{self, Chapter};
use crate::elements::VerticalSpace;
use crate::error::{ReportError, Result};
use crate::model::{Block, Cover, FigureBlock, HorizontalAlignment, RichParagraph, Section};
use crate::richtext::Span;

/// Height of one body text line; also the gap an empty line leaves.
const BODY_LINE_MM: f64 = 7.0;
const COVER_BLOCK_GAP_MM: f64 = 40.0;
const HEADER_GAP_MM: i32 = 5;
const FOOTER_HEIGHT_MM: i32 = 10;
const HEADER_FONT_SIZE: u8 = 8;

/// Splits a chapter text into justified paragraphs, one per line, with a gap for each empty
/// line and one after the text.
pub fn body_blocks(body: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = body
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                Block::spacer(BODY_LINE_MM)
            } else {
                Block::Paragraph(
                    RichParagraph::new(vec![Span::new(line)])
                        .with_alignment(HorizontalAlignment::Justified),
                )
            }
        })
        .collect();
    blocks.push(Block::spacer(BODY_LINE_MM));
    blocks
}

/// Builds the numbered section for `chapter`, resolving its figures inside the working
/// directory.
pub fn chapter_section(chapter: &Chapter, config: &ReportConfig) -> Section {
    let mut section = Section::new(chapter.title)
        .with_number(chapter.number)
        .with_blocks(body_blocks(chapter.body));

    for (index, figure) in chapter.figures.iter().enumerate() {
        if index > 0 {
            section = section.with_block(Block::page_break());
        }
        section = section.with_block(Block::figure(FigureBlock::new(
            config.staged_path(figure.file_name),
            figure.caption,
        )));
    }
    section
}

fn cover() -> Cover {
    let centered = HorizontalAlignment::Center;
    Cover::new(content::COVER_TITLE)
        .with_subtitle(Some(content::COVER_SUBTITLE.to_string()))
        .with_blocks([
            Block::line(Span::new(content::COVER_CONTEXT).sized(14), centered),
            Block::spacer(COVER_BLOCK_GAP_MM),
            Block::line(Span::new(content::COVER_AUTHOR).bold().sized(12), centered),
            Block::line(Span::new(content::COVER_SUPERVISOR).bold().sized(12), centered),
            Block::spacer(COVER_BLOCK_GAP_MM),
            Block::line(
                Span::new(content::COVER_ACADEMIC_YEAR).bold().sized(12),
                centered,
            ),
        ])
}

fn running_header(page: usize) -> Option<LinearLayout> {
    if page <= 1 {
        return None;
    }

    let mut title = Paragraph::new(
        Span::new(content::RUNNING_TITLE)
            .italic()
            .sized(HEADER_FONT_SIZE),
    );
    title.set_alignment(Alignment::Right);

    let mut layout = LinearLayout::vertical();
    layout.push(title);
    layout.push(VerticalSpace::new(HEADER_GAP_MM));
    Some(layout)
}

fn page_footer(page: usize) -> Paragraph {
    let mut footer = Paragraph::new(
        Span::new(format!("Page {}", page))
            .italic()
            .sized(HEADER_FONT_SIZE),
    );
    footer.set_alignment(Alignment::Center);
    footer
}

/// Lays out the complete report for `config` without rendering it.
pub fn report_builder(config: &ReportConfig) -> PdfBuilder {
    content::CHAPTERS.iter().fold(
        PdfBuilder::new()
            .with_title(content::RUNNING_TITLE)
            .with_header(running_header)
            .with_footer(FOOTER_HEIGHT_MM, page_footer)
            .with_cover(cover())
            .include_printed_toc(true)
            .with_toc_title(Some(content::TOC_TITLE.to_string())),
        |builder, chapter| builder.add_section(chapter_section(chapter, config)),
    )
}

/// Renders the report from the figures currently staged in the working directory and writes it
/// to [`ReportConfig::output_path`].
pub fn generate_report(config: &ReportConfig) -> Result<RenderedPdf> {
    let builder = report_builder(config);

    #[cfg(feature = "bookmarks")]
    let rendered = builder.render_with_bookmarks()?;
    #[cfg(not(feature = "bookmarks"))]
    let rendered = builder.render()?;

    let path = config.output_path();
    fs::write(&path, &rendered.bytes).map_err(|error| ReportError::Write {
        path: path.clone(),
        error,
    })?;
    info!(
        "Wrote {} ({} pages, {} bytes, {} of {} figures embedded)",
        path.display(),
        rendered.page_count,
        rendered.bytes.len(),
        rendered.embedded_figures(),
        rendered.figures.len()
    );

    Ok(rendered)
}
