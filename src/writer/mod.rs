//! PDF serialization.
//!
//! Assembles laid-out pages into a complete PDF 1.4 file: catalog, page
//! tree, built-in Type1 font dictionaries, image XObjects, uncompressed
//! page content streams, cross-reference table, and trailer. No file
//! identifier and no implicit timestamps are written, so serialization is
//! fully deterministic.

mod images;
mod objects;

use std::collections::{BTreeMap, BTreeSet};

use crate::canvas::{fmt_pt, ImageRegistry, PageContent};
use crate::document::{Metadata, PageFormat};
use crate::error::Result;
use crate::font::{self, Font};
use objects::{stream_object, ObjectWriter};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const RESOURCES_ID: usize = 3;

/// Serialize finished pages and their shared resources to PDF bytes.
pub(crate) fn serialize(
    format: &PageFormat,
    metadata: &Metadata,
    pages: &[PageContent],
    registry: &ImageRegistry,
) -> Result<Vec<u8>> {
    // Union of fonts referenced anywhere; BTreeSet keeps the numbering
    // stable across runs.
    let fonts: BTreeSet<Font> = pages.iter().flat_map(|p| p.fonts.iter().copied()).collect();

    // Object id layout: fixed ids, then fonts, then images (each with an
    // optional soft mask), then page/content pairs, then /Info.
    let mut next_id = RESOURCES_ID + 1;
    let font_ids: BTreeMap<Font, usize> = fonts
        .iter()
        .map(|f| {
            let id = next_id;
            next_id += 1;
            (*f, id)
        })
        .collect();

    // Only images some page actually placed get embedded; the key is the
    // registry index so resource names stay aligned with the canvas.
    let used_images: BTreeSet<usize> = pages.iter().flat_map(|p| p.images.iter().copied()).collect();
    let image_ids: BTreeMap<usize, (usize, Option<usize>)> = used_images
        .iter()
        .map(|&index| {
            let id = next_id;
            next_id += 1;
            let smask = registry.entries()[index].alpha().map(|_| {
                let id = next_id;
                next_id += 1;
                id
            });
            (index, (id, smask))
        })
        .collect();

    let page_ids: Vec<(usize, usize)> = pages
        .iter()
        .map(|_| {
            let ids = (next_id, next_id + 1);
            next_id += 2;
            ids
        })
        .collect();

    let info_id = (!metadata.is_empty()).then_some(next_id);

    let mut writer = ObjectWriter::new();

    writer.write_object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );

    let kids: Vec<String> = page_ids.iter().map(|(id, _)| format!("{} 0 R", id)).collect();
    writer.write_object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        )
        .as_bytes(),
    );

    writer.write_object(RESOURCES_ID, resources_dict(&font_ids, &image_ids).as_bytes());

    for (fnt, id) in &font_ids {
        writer.write_object(
            *id,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                fnt.base_name()
            )
            .as_bytes(),
        );
    }

    for (&index, &(image_id, smask_id)) in &image_ids {
        let image = &registry.entries()[index];
        let body = images::image_object(image, smask_id)?;
        writer.write_object(image_id, &body);
        if let (Some(alpha), Some(id)) = (image.alpha(), smask_id) {
            let body = images::smask_object(image, alpha)?;
            writer.write_object(id, &body);
        }
    }

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        writer.write_object(
            *page_id,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
                 /Resources {} 0 R /Contents {} 0 R >>",
                PAGES_ID,
                fmt_pt(format.width()),
                fmt_pt(format.height()),
                RESOURCES_ID,
                content_id
            )
            .as_bytes(),
        );
        writer.write_object(*content_id, &stream_object("", &page.content));
    }

    if let Some(id) = info_id {
        writer.write_object(id, info_dict(metadata).as_bytes());
    }

    Ok(writer.finish(CATALOG_ID, info_id))
}

/// Shared `/Resources` dictionary listing every font and image in the file.
fn resources_dict(
    font_ids: &BTreeMap<Font, usize>,
    image_ids: &BTreeMap<usize, (usize, Option<usize>)>,
) -> String {
    let mut dict = String::from("<< ");
    if !font_ids.is_empty() {
        dict.push_str("/Font << ");
        for (fnt, id) in font_ids {
            dict.push_str(&format!("/{} {} 0 R ", fnt.resource_name(), id));
        }
        dict.push_str(">> ");
    }
    if !image_ids.is_empty() {
        dict.push_str("/XObject << ");
        for (&index, &(id, _)) in image_ids {
            dict.push_str(&format!("/{} {} 0 R ", ImageRegistry::resource_name(index), id));
        }
        dict.push_str(">> ");
    }
    dict.push_str(">>");
    dict
}

/// The `/Info` dictionary for set metadata fields.
fn info_dict(metadata: &Metadata) -> String {
    fn entry(dict: &mut String, key: &str, value: &str) {
        let escaped = font::escape_pdf_string(&font::encode_text(value));
        dict.push_str(&format!(
            "/{} ({}) ",
            key,
            String::from_utf8_lossy(&escaped)
        ));
    }

    let mut dict = String::from("<< ");
    if let Some(ref title) = metadata.title {
        entry(&mut dict, "Title", title);
    }
    if let Some(ref author) = metadata.author {
        entry(&mut dict, "Author", author);
    }
    if let Some(ref subject) = metadata.subject {
        entry(&mut dict, "Subject", subject);
    }
    if let Some(ref creator) = metadata.creator {
        entry(&mut dict, "Creator", creator);
    }
    if let Some(ref producer) = metadata.producer {
        entry(&mut dict, "Producer", producer);
    }
    if let Some(created) = metadata.created {
        dict.push_str(&format!("/CreationDate (D:{}) ", created.format("%Y%m%d%H%M%SZ")));
    }
    dict.push_str(">>");
    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::element::RasterImage;
    use crate::geom::Color;
    use std::sync::Arc;

    fn one_page(registry: &mut ImageRegistry, with_image: bool) -> PageContent {
        let mut canvas = Canvas::new(registry);
        canvas.show_text(Font::Helvetica, 11.0, 80.0, 750.0, "Name");
        canvas.set_fill_color(Color::BLACK);
        canvas.fill_rect(80.0, 700.0, 500.0, 8.0);
        if with_image {
            let image = Arc::new(RasterImage::solid(4, 4, [1, 2, 3]));
            canvas.draw_image(&image, 200.0, 600.0, 4.0, 4.0);
        }
        canvas.finish()
    }

    #[test]
    fn test_minimal_file_structure() {
        let registry = ImageRegistry::new();
        let mut scratch = ImageRegistry::new();
        let pages = vec![one_page(&mut scratch, false)];
        let bytes = serialize(
            &PageFormat::a4(),
            &Metadata::default(),
            &pages,
            &registry,
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
        // No metadata: no /Info in the trailer.
        assert!(!text.contains("/Info"));
    }

    #[test]
    fn test_image_resources_serialized() {
        let mut registry = ImageRegistry::new();
        let pages = vec![one_page(&mut registry, true)];
        let bytes = serialize(
            &PageFormat::a4(),
            &Metadata::default(),
            &pages,
            &registry,
        )
        .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/XObject << /Im1"));
        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_info_dict_written_when_set() {
        let registry = ImageRegistry::new();
        let mut scratch = ImageRegistry::new();
        let pages = vec![one_page(&mut scratch, false)];
        let metadata = Metadata {
            title: Some("Owner Record".to_string()),
            producer: Some("clinicpdf".to_string()),
            ..Default::default()
        };
        let bytes = serialize(&PageFormat::a4(), &metadata, &pages, &registry).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Owner Record)"));
        assert!(text.contains("/Producer (clinicpdf)"));
        assert!(text.contains("/Info"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let make = || {
            let mut registry = ImageRegistry::new();
            let pages = vec![one_page(&mut registry, true)];
            serialize(&PageFormat::a4(), &Metadata::default(), &pages, &registry).unwrap()
        };
        assert_eq!(make(), make());
    }
}
