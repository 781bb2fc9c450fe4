//! Content-stream painter.
//!
//! A [`Canvas`] buffers the PDF operators for one page and records which
//! fonts and images the page references. It is passed explicitly through
//! every `draw` call, so rendering never relies on global drawing state.
//! Fill color persists across operations, matching the underlying content
//! stream semantics.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::element::RasterImage;
use crate::font::{self, Font};
use crate::geom::Color;

/// Format a point value for a content stream operand.
///
/// Two decimal places, trailing zeros stripped, so that equal inputs
/// always produce equal output bytes.
pub(crate) fn fmt_pt(v: f32) -> String {
    let s = format!("{:.2}", v);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Document-wide registry of embedded raster images.
///
/// Images are deduplicated by identity: drawing the same `Arc` on several
/// pages embeds the pixel data once.
#[derive(Default)]
pub struct ImageRegistry {
    entries: Vec<Arc<RasterImage>>,
}

impl ImageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and return its index, reusing an existing entry
    /// when the same allocation was registered before.
    pub fn register(&mut self, image: &Arc<RasterImage>) -> usize {
        if let Some(index) = self.entries.iter().position(|e| Arc::ptr_eq(e, image)) {
            index
        } else {
            self.entries.push(Arc::clone(image));
            self.entries.len() - 1
        }
    }

    /// All registered images in registration order.
    pub fn entries(&self) -> &[Arc<RasterImage>] {
        &self.entries
    }

    /// The content-stream resource name for an image index (`Im1`, `Im2`, ...).
    pub fn resource_name(index: usize) -> String {
        format!("Im{}", index + 1)
    }
}

/// Rendered operators and resource references for one finished page.
pub(crate) struct PageContent {
    /// Raw content-stream bytes.
    pub content: Vec<u8>,
    /// Fonts the page references.
    pub fonts: BTreeSet<Font>,
    /// Registry indices of images the page references.
    pub images: BTreeSet<usize>,
}

/// Painter context for one page.
pub struct Canvas<'a> {
    content: Vec<u8>,
    fonts: BTreeSet<Font>,
    images: BTreeSet<usize>,
    registry: &'a mut ImageRegistry,
}

impl<'a> Canvas<'a> {
    /// Create a canvas drawing into `registry` for image resources.
    pub fn new(registry: &'a mut ImageRegistry) -> Self {
        Self {
            content: Vec::new(),
            fonts: BTreeSet::new(),
            images: BTreeSet::new(),
            registry,
        }
    }

    /// Set the non-stroking fill color for subsequent fills and text.
    pub fn set_fill_color(&mut self, color: Color) {
        self.push_line(&format!(
            "{} {} {} rg",
            fmt_pt(color.r),
            fmt_pt(color.g),
            fmt_pt(color.b)
        ));
    }

    /// Fill the rectangle with lower-left corner `(x, y)` using the
    /// current fill color.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push_line(&format!(
            "{} {} {} {} re\nf",
            fmt_pt(x),
            fmt_pt(y),
            fmt_pt(width),
            fmt_pt(height)
        ));
    }

    /// Show one run of text with its baseline at `(x, baseline)`.
    pub fn show_text(&mut self, fnt: Font, size: f32, x: f32, baseline: f32, text: &str) {
        self.fonts.insert(fnt);
        let escaped = font::escape_pdf_string(&font::encode_text(text));
        self.push_line(&format!(
            "BT\n/{} {} Tf\n{} {} Td",
            fnt.resource_name(),
            fmt_pt(size),
            fmt_pt(x),
            fmt_pt(baseline)
        ));
        self.content.push(b'(');
        self.content.extend_from_slice(&escaped);
        self.content.extend_from_slice(b") Tj\nET\n");
    }

    /// Place an image with lower-left corner `(x, y)` scaled to
    /// `width` x `height` points.
    pub fn draw_image(&mut self, image: &Arc<RasterImage>, x: f32, y: f32, width: f32, height: f32) {
        let index = self.registry.register(image);
        self.images.insert(index);
        self.push_line(&format!(
            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ",
            fmt_pt(width),
            fmt_pt(height),
            fmt_pt(x),
            fmt_pt(y),
            ImageRegistry::resource_name(index)
        ));
    }

    /// The operators emitted so far.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the canvas into a finished page.
    pub(crate) fn finish(self) -> PageContent {
        PageContent {
            content: self.content,
            fonts: self.fonts,
            images: self.images,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.content.extend_from_slice(line.as_bytes());
        self.content.push(b'\n');
    }
}
