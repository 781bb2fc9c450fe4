//! Document assembly and page-flowing layout.
//!
//! A [`Document`] is an ordered sequence of drawable elements plus page
//! margin settings. Elements are laid out top to bottom; when the
//! remaining page height is exhausted the layout flows onto a fresh page.
//! A document is built once per export, serialized once, then discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ImageRegistry};
use crate::element::{Drawable, NullDrawListener};
use crate::error::Result;
use crate::geom::{Margins, Position};
use crate::writer;

/// Page size and page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    width: f32,
    height: f32,
    margins: Margins,
}

impl PageFormat {
    /// A4 portrait (595.28 x 841.89 pt) with zero margins.
    pub fn a4() -> Self {
        Self {
            width: 595.275_6,
            height: 841.889_8,
            margins: Margins::zero(),
        }
    }

    /// US Letter portrait (612 x 792 pt) with zero margins.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margins: Margins::zero(),
        }
    }

    /// Replace the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Page margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Width available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }
}

/// Horizontal placement of an element within the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Flush with the left content edge.
    Left,
    /// Centered between the content edges.
    Center,
    /// Flush with the right content edge.
    Right,
}

/// Placement hint for one element in the vertical flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLayoutHint {
    /// Horizontal alignment.
    pub alignment: Alignment,
    /// Extra space reserved around the element.
    pub margins: Margins,
}

impl VerticalLayoutHint {
    /// A hint with explicit alignment and margins.
    pub fn new(alignment: Alignment, margins: Margins) -> Self {
        Self { alignment, margins }
    }

    /// Centered horizontally with extra space above.
    pub fn centered(top_margin: f32) -> Self {
        Self {
            alignment: Alignment::Center,
            margins: Margins::new(0.0, 0.0, top_margin, 0.0),
        }
    }
}

impl Default for VerticalLayoutHint {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            margins: Margins::zero(),
        }
    }
}

/// Document information written to the PDF `/Info` dictionary.
///
/// All fields are optional; the creation date is never defaulted to the
/// current time, so identical documents serialize to identical bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,

    /// Document author.
    pub author: Option<String>,

    /// Document subject.
    pub subject: Option<String>,

    /// Creator application.
    pub creator: Option<String>,

    /// PDF producer.
    pub producer: Option<String>,

    /// Creation date.
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.created.is_none()
    }
}

/// An ordered sequence of drawable elements with page-flow layout.
pub struct Document {
    format: PageFormat,
    /// Document metadata written to the `/Info` dictionary.
    pub metadata: Metadata,
    elements: Vec<(Box<dyn Drawable>, VerticalLayoutHint)>,
}

impl Document {
    /// Create an empty document with the given page format.
    pub fn new(format: PageFormat) -> Self {
        Self {
            format,
            metadata: Metadata::default(),
            elements: Vec::new(),
        }
    }

    /// The page format the document lays out against.
    pub fn format(&self) -> PageFormat {
        self.format
    }

    /// Append an element with default placement.
    pub fn add(&mut self, element: impl Drawable + 'static) {
        self.add_with_hint(element, VerticalLayoutHint::default());
    }

    /// Append an element with an explicit placement hint.
    pub fn add_with_hint(&mut self, element: impl Drawable + 'static, hint: VerticalLayoutHint) {
        self.elements.push((Box::new(element), hint));
    }

    /// Number of top-level elements added so far.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Lay out all elements and serialize the document to PDF bytes.
    ///
    /// The document is consumed: it exists for one export and is then
    /// discarded. An empty document still produces one blank page.
    pub fn save(self) -> Result<Vec<u8>> {
        let format = self.format;
        let content_width = format.content_width();
        let left = format.margins().left;
        let top_y = format.height() - format.margins().top;
        let bottom = format.margins().bottom;

        let mut registry = ImageRegistry::new();
        let mut pages = Vec::new();
        let mut canvas = Canvas::new(&mut registry);
        let mut listener = NullDrawListener;
        let mut y = top_y;
        let mut page_has_content = false;
        let element_count = self.elements.len();

        for (mut element, hint) in self.elements {
            let available = content_width - hint.margins.left - hint.margins.right;
            element.set_max_width(available);

            let needed = hint.margins.top + element.height() + hint.margins.bottom;
            if page_has_content && y - needed < bottom {
                pages.push(canvas.finish());
                canvas = Canvas::new(&mut registry);
                y = top_y;
                page_has_content = false;
                element.remove_leading_empty_vertical_space();
            }

            let height = element.height();
            let x = match hint.alignment {
                Alignment::Left => left + hint.margins.left,
                Alignment::Center => {
                    left + hint.margins.left + (available - element.width()) / 2.0
                }
                Alignment::Right => {
                    left + content_width - hint.margins.right - element.width()
                }
            };

            y -= hint.margins.top;
            element.draw(&mut canvas, Position::new(x, y), &mut listener)?;
            y -= height + hint.margins.bottom;
            page_has_content = true;
        }
        pages.push(canvas.finish());

        log::debug!(
            "laid out {} elements onto {} pages",
            element_count,
            pages.len()
        );
        writer::serialize(&format, &self.metadata, &pages, &registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Paragraph;
    use crate::font::Font;

    fn tall_paragraph(lines: usize) -> Paragraph {
        let mut p = Paragraph::new();
        for _ in 0..lines {
            p.add_text("line of flowing text", Font::TimesRoman, 11.0);
            p.add_line_break(11.0);
        }
        p
    }

    #[test]
    fn test_page_format_content_width() {
        let format = PageFormat::a4().with_margins(Margins::new(80.0, 60.0, 40.0, 60.0));
        assert!((format.content_width() - 455.275_6).abs() < 1e-3);
        assert_eq!(PageFormat::letter().width(), 612.0);
    }

    #[test]
    fn test_empty_document_has_one_blank_page() {
        let doc = Document::new(PageFormat::a4());
        let bytes = doc.save().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn test_flow_breaks_onto_second_page() {
        let format = PageFormat::a4().with_margins(Margins::new(80.0, 60.0, 40.0, 60.0));
        let mut doc = Document::new(format);
        // Each paragraph is ~30 lines tall; five of them exceed one page.
        for _ in 0..5 {
            doc.add(tall_paragraph(30));
        }
        let bytes = doc.save().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn test_single_page_document() {
        let format = PageFormat::a4().with_margins(Margins::new(80.0, 60.0, 40.0, 60.0));
        let mut doc = Document::new(format);
        doc.add(tall_paragraph(3));
        let bytes = doc.save().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn test_centered_hint_offsets_element() {
        let format = PageFormat::a4().with_margins(Margins::new(80.0, 60.0, 40.0, 60.0));
        let mut doc = Document::new(format);
        let mut line = Paragraph::new();
        line.add_text("centered", Font::Helvetica, 11.0);
        doc.add_with_hint(line, VerticalLayoutHint::centered(20.0));

        let bytes = doc.save().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        // Centered start: 80 + (455.28 - w)/2 with w ~ 45.9pt.
        let width = Font::Helvetica.text_width("centered", 11.0);
        let expected_x = 80.0 + (format.content_width() - width) / 2.0;
        assert!(text.contains(&format!("{:.0}", expected_x.floor())));
    }

    #[test]
    fn test_metadata_is_empty() {
        let mut metadata = Metadata::default();
        assert!(metadata.is_empty());
        metadata.title = Some("Owner Record".to_string());
        assert!(!metadata.is_empty());
    }
}
