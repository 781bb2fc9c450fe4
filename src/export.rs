//! Owner-record PDF exporter.
//!
//! Transforms one [`OwnerRecord`] into a serialized PDF: a labeled
//! key/value text block, a horizontal divider rendered through a
//! [`LayoutBox`], and a centered clinic logo. Rendering is a stateless,
//! single-pass transformation; every call builds and discards its own
//! document, so concurrent calls share nothing but the read-only bundled
//! logo bytes.

use std::fs;
use std::path::PathBuf;

use crate::document::{Document, Metadata, PageFormat, VerticalLayoutHint};
use crate::element::{ImageElement, LayoutBox, Paragraph};
use crate::error::Result;
use crate::font::Font;
use crate::geom::{Color, Margins};
use crate::owner::OwnerRecord;

/// Clinic logo bundled into the binary.
static BUNDLED_LOGO: &[u8] = include_bytes!("../assets/logo.png");

/// Font size for field labels and values.
const FIELD_SIZE: f32 = 11.0;
/// Column the field values start at, in points from the left edge.
const LABEL_COLUMN: f32 = 100.0;
/// Height of the blank line after the field block.
const FIELD_GAP: f32 = 12.0;

/// Where the exporter loads the clinic logo from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogoSource {
    /// The logo bundled into the binary at build time.
    #[default]
    Bundled,
    /// An image file read at render time. A missing file fails the
    /// render with an I/O error; nothing is emitted in its place.
    Path(PathBuf),
    /// No logo: the document is rendered without one.
    None,
}

/// Builder-style exporter turning owner records into PDF bytes.
///
/// # Example
///
/// ```no_run
/// use clinicpdf::{OwnerRecord, PdfExporter};
///
/// fn main() -> clinicpdf::Result<()> {
///     let owner = OwnerRecord::new(1, "George", "Franklin", "110 W. Liberty St.", "Madison");
///     let pdf = PdfExporter::new().render(&owner)?;
///     std::fs::write("owner_export.pdf", pdf)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    logo: LogoSource,
    metadata: Option<Metadata>,
}

impl PdfExporter {
    /// Create an exporter using the bundled logo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the logo from a file at render time instead of the bundled one.
    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = LogoSource::Path(path.into());
        self
    }

    /// Render without any logo.
    pub fn without_logo(mut self) -> Self {
        self.logo = LogoSource::None;
        self
    }

    /// Replace the default document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The configured logo source.
    pub fn logo_source(&self) -> &LogoSource {
        &self.logo
    }

    /// Render one owner record to PDF bytes.
    ///
    /// All-or-nothing: a failure to load the logo or serialize the
    /// document yields an error, never a truncated document. Output is
    /// byte-identical across calls for the same record and logo bytes.
    pub fn render(&self, owner: &OwnerRecord) -> Result<Vec<u8>> {
        owner.validate()?;
        log::info!("rendering owner record {}", owner.id);

        let format = PageFormat::a4().with_margins(Margins::new(80.0, 60.0, 40.0, 60.0));
        let mut document = Document::new(format);
        document.metadata = self.metadata.clone().unwrap_or_else(|| Metadata {
            title: Some("Owner Record".to_string()),
            producer: Some(concat!("clinicpdf ", env!("CARGO_PKG_VERSION")).to_string()),
            ..Default::default()
        });

        document.add(field_block(owner));
        document.add(divider());

        match &self.logo {
            LogoSource::Bundled => {
                let logo = ImageElement::from_bytes(BUNDLED_LOGO)?;
                document.add_with_hint(logo, VerticalLayoutHint::centered(20.0));
            }
            LogoSource::Path(path) => {
                let bytes = fs::read(path)?;
                let logo = ImageElement::from_bytes(&bytes)?;
                document.add_with_hint(logo, VerticalLayoutHint::centered(20.0));
            }
            LogoSource::None => {
                log::debug!("logo disabled, rendering without one");
            }
        }

        document.save()
    }
}

/// The labeled field block: Name, Address, City.
fn field_block(owner: &OwnerRecord) -> Paragraph {
    let mut fields = Paragraph::new();
    fields.add_indent("Name", Font::Helvetica, FIELD_SIZE, LABEL_COLUMN);
    fields.add_text(owner.full_name(), Font::TimesRoman, FIELD_SIZE);
    fields.add_line_break(FIELD_GAP);

    fields.add_indent("Address", Font::Helvetica, FIELD_SIZE, LABEL_COLUMN);
    fields.add_text(owner.address.as_str(), Font::TimesRoman, FIELD_SIZE);
    fields.add_line_break(FIELD_GAP);

    fields.add_indent("City", Font::Helvetica, FIELD_SIZE, LABEL_COLUMN);
    fields.add_text(owner.city.as_str(), Font::TimesRoman, FIELD_SIZE);
    fields.add_line_break(FIELD_GAP);

    // One blank line separating the block from the divider.
    fields.add_line_break(FIELD_GAP);
    fields
}

/// A thin horizontal rule: an empty paragraph framed in a black box.
fn divider() -> LayoutBox {
    let mut rule = LayoutBox::new(Box::new(Paragraph::new()), 500.0, 8.0);
    rule.set_margins(10.0, 10.0, 20.0, 5.0);
    rule.set_background_color(Color::BLACK);
    rule
}
