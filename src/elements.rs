//! Extended element implementations built on top of `genpdf` primitives.
//!
//! This module adds a captioned image that keeps the image and its caption on the same page,
//! a fixed vertical gap, and a zero-sized marker that records the page it lands on.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const DEFAULT_CAPTION_SPACING_MM: f64 = 2.0;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Drops the alpha channel, which the PDF backend cannot embed.
fn flatten_alpha(image: image::DynamicImage) -> image::DynamicImage {
    if image.color().has_alpha() {
        image::DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}

fn image_from_dynamic(image: image::DynamicImage) -> Result<(Image, Size), Error> {
    let image = flatten_alpha(image);
    let size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
    let image = Image::from_dynamic_image(image)?;
    Ok((image, size))
}

/// An image with a caption stacked underneath, rendered as a unit.
///
/// The image is scaled to a requested width while keeping its aspect ratio. A maximum height
/// caps the scale so the pair always fits on an empty page; when the pair does not fit in the
/// space left on the current page nothing is drawn and the element moves to the next page.
pub struct CaptionedImage {
    image: Image,
    caption: Paragraph,
    caption_style: Style,
    alignment: Alignment,
    natural_size: Size,
    requested_width: Option<Mm>,
    max_height: Option<Mm>,
    spacing: Mm,
}

impl CaptionedImage {
    fn new(image: Image, caption: StyledString, natural_size: Size) -> Self {
        let caption_style = caption.style;
        let mut element = Self {
            image,
            caption: Paragraph::new(caption),
            caption_style,
            alignment: Alignment::Left,
            natural_size,
            requested_width: None,
            max_height: None,
            spacing: mm_from_f64(DEFAULT_CAPTION_SPACING_MM),
        };
        element.apply_alignment();
        element
    }

    /// Creates a captioned image from an existing [`DynamicImage`][image::DynamicImage].
    pub fn from_dynamic_image(
        image: image::DynamicImage,
        caption: impl Into<StyledString>,
    ) -> Result<Self, Error> {
        let (image, size) = image_from_dynamic(image)?;
        Ok(Self::new(image, caption.into(), size))
    }

    /// Creates a captioned image from the file located at `path`.
    pub fn from_path(path: impl AsRef<Path>, caption: impl Into<StyledString>) -> Result<Self, Error> {
        let dynamic = decode_image_from_path(path)?;
        Self::from_dynamic_image(dynamic, caption)
    }

    /// Returns the image size at the default resolution, before any scaling.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Sets the horizontal alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.apply_alignment();
        self
    }

    /// Constrains the rendered width of the image while preserving the aspect ratio.
    pub fn with_width(mut self, width: impl Into<Option<Mm>>) -> Self {
        self.requested_width = width.into();
        self
    }

    /// Caps the rendered image height, shrinking the width proportionally when needed.
    pub fn with_max_height(mut self, height: impl Into<Option<Mm>>) -> Self {
        self.max_height = height.into();
        self
    }

    fn apply_alignment(&mut self) {
        self.image.set_alignment(self.alignment);
        self.caption.set_alignment(self.alignment);
    }

    /// Scale factor applied to the natural size, given the width available in the area.
    fn scale_for(&self, available_width: Mm) -> f64 {
        let natural_width = mm_to_f64(self.natural_size.width);
        let natural_height = mm_to_f64(self.natural_size.height);
        if natural_width <= f64::EPSILON || natural_height <= f64::EPSILON {
            return 1.0;
        }

        let mut scale = match self.requested_width {
            Some(width) => mm_to_f64(width) / natural_width,
            None => 1.0,
        };
        scale = scale.min(mm_to_f64(available_width) / natural_width);
        if let Some(max_height) = self.max_height {
            scale = scale.min(mm_to_f64(max_height) / natural_height);
        }
        scale
    }
}

impl Element for CaptionedImage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let scale = self.scale_for(area.size().width);
        self.image.set_scale(Scale::new(scale, scale));

        let image_height = mm_to_f64(self.natural_size.height) * scale;
        let caption_height = mm_to_f64(style.and(self.caption_style).line_height(&context.font_cache));
        let required = image_height + mm_to_f64(self.spacing) + caption_height;
        if required > mm_to_f64(area.size().height) {
            let mut result = RenderResult::default();
            result.has_more = true;
            return Ok(result);
        }

        let mut result = RenderResult::default();
        let image_result = self.image.render(context, area.clone(), style)?;
        result.size = result.size.stack_vertical(image_result.size);

        let spacing = self.spacing;
        area.add_offset(Position::new(0, image_result.size.height + spacing));
        result.size = result.size.stack_vertical(Size::new(0, spacing));

        let caption_result = self.caption.render(context, area, style)?;
        result.size = result.size.stack_vertical(caption_result.size);
        result.has_more |= caption_result.has_more;

        Ok(result)
    }
}

/// A fixed vertical gap, truncated to the space left on the page.
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    /// Creates a gap of `height` millimetres.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Shared page bookkeeping between the page decorator and [`PageMarker`] elements.
#[derive(Debug, Default)]
pub struct PageTracker {
    current: Cell<usize>,
    marks: RefCell<Vec<Option<usize>>>,
}

impl PageTracker {
    /// Creates a tracker with `slots` unset marks.
    pub fn with_slots(slots: usize) -> Rc<Self> {
        Rc::new(Self {
            current: Cell::new(0),
            marks: RefCell::new(vec![None; slots]),
        })
    }

    /// Advances to the next page and returns its 1-based number.
    pub fn next_page(&self) -> usize {
        let page = self.current.get() + 1;
        self.current.set(page);
        page
    }

    /// Returns the 1-based number of the page being rendered, or zero before the first page.
    pub fn current_page(&self) -> usize {
        self.current.get()
    }

    fn mark(&self, slot: usize) {
        if let Some(entry) = self.marks.borrow_mut().get_mut(slot) {
            entry.get_or_insert(self.current.get());
        }
    }

    /// Returns the page recorded for every slot.
    pub fn marks(&self) -> Vec<Option<usize>> {
        self.marks.borrow().clone()
    }
}

/// Zero-sized element recording the page it is rendered on into a [`PageTracker`] slot.
pub struct PageMarker {
    tracker: Rc<PageTracker>,
    slot: usize,
}

impl PageMarker {
    /// Creates a marker writing into `slot` of `tracker`.
    pub fn new(tracker: Rc<PageTracker>, slot: usize) -> Self {
        Self { tracker, slot }
    }
}

impl Element for PageMarker {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        _area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        self.tracker.mark(self.slot);
        Ok(RenderResult::default())
    }
}
