//! Chapter outline (PDF bookmarks) added to the rendered report with `lopdf`.
//!
//! The outline is flat: one entry per chapter, titled with its `N. Title` label and opening
//! the page the chapter starts on.

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::encoding;
use crate::model::Section;

/// Errors raised while adding the outline to a rendered document.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("PDF trailer has no catalog reference")]
    MissingCatalog,
    #[error("PDF catalog is not a dictionary")]
    InvalidCatalog,
    #[error("chapter {section_index} starts on page {page_number}, which does not exist")]
    MissingPage {
        section_index: usize,
        page_number: usize,
    },
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

/// One outline entry: the encoded title and the page object it opens.
struct Target {
    title: Vec<u8>,
    page: ObjectId,
}

/// Adds an outline entry for every section whose start page was recorded.
///
/// Sections without a page are left out. Returns the input unchanged when no entry remains.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    sections: &[Section],
    section_pages: &[Option<usize>],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let targets = resolve_targets(&document, sections, section_pages)?;
    if targets.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    let item_ids: Vec<ObjectId> = targets.iter().map(|_| document.new_object_id()).collect();

    for (index, target) in targets.into_iter().enumerate() {
        let mut item = Dictionary::new();
        item.set("Title", Object::string_literal(target.title));
        item.set("Parent", Object::Reference(outlines_id));
        item.set(
            "Dest",
            vec![Object::Reference(target.page), Object::Name(b"Fit".to_vec())],
        );
        if let Some(previous) = index.checked_sub(1).map(|prev| item_ids[prev]) {
            item.set("Prev", Object::Reference(previous));
        }
        if let Some(next) = item_ids.get(index + 1) {
            item.set("Next", Object::Reference(*next));
        }
        document
            .objects
            .insert(item_ids[index], Object::Dictionary(item));
    }

    let mut outlines = Dictionary::new();
    outlines.set("Type", Object::Name(b"Outlines".to_vec()));
    outlines.set("Count", Object::Integer(item_ids.len() as i64));
    outlines.set("First", Object::Reference(item_ids[0]));
    outlines.set("Last", Object::Reference(item_ids[item_ids.len() - 1]));
    document
        .objects
        .insert(outlines_id, Object::Dictionary(outlines));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;
    let catalog = document
        .get_object_mut(catalog_id)
        .map_err(|_| BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn resolve_targets(
    document: &Document,
    sections: &[Section],
    section_pages: &[Option<usize>],
) -> Result<Vec<Target>, BookmarkError> {
    let pages = document.get_pages();

    sections
        .iter()
        .zip(section_pages)
        .enumerate()
        .filter_map(|(index, (section, page))| page.map(|page| (index, section, page)))
        .map(|(section_index, section, page_number)| {
            let page = u32::try_from(page_number)
                .ok()
                .and_then(|number| pages.get(&number).copied())
                .ok_or(BookmarkError::MissingPage {
                    section_index,
                    page_number,
                })?;
            Ok(Target {
                title: pdf_doc_bytes(&section.label()),
                page,
            })
        })
        .collect()
}

/// Encodes an outline title. PDFDocEncoding agrees with ISO-8859-1 on the folded repertoire.
fn pdf_doc_bytes(title: &str) -> Vec<u8> {
    encoding::to_single_byte(title)
        .chars()
        .map(|ch| ch as u32 as u8)
        .collect()
}
