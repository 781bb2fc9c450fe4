//! Raster image elements.

use std::sync::Arc;

use image::GenericImageView;

use crate::canvas::Canvas;
use crate::element::{DrawListener, Drawable};
use crate::error::Result;
use crate::geom::Position;

/// Decoded raster pixels ready for embedding.
///
/// Pixels are stored as 8-bit RGB with an optional separate alpha channel;
/// the writer emits the alpha channel as a soft mask.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Decode an encoded image (PNG) into raw pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let (width, height) = decoded.dimensions();
        let has_alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        Ok(Self {
            width,
            height,
            rgb,
            alpha: has_alpha.then_some(alpha),
        })
    }

    /// A uniformly colored opaque image. Useful as a stand-in in tests.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            rgb: data,
            alpha: None,
        }
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved 8-bit RGB samples, row-major from the top-left.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// 8-bit alpha samples, when the source had transparency.
    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }
}

/// An image placed in the document flow.
///
/// The intrinsic size is one point per pixel; constraining the max width
/// scales the image down preserving its aspect ratio. Images are never
/// scaled up.
pub struct ImageElement {
    data: Arc<RasterImage>,
    scale: f32,
}

impl ImageElement {
    /// Wrap an already decoded image.
    pub fn new(data: Arc<RasterImage>) -> Self {
        Self { data, scale: 1.0 }
    }

    /// Decode an encoded image (PNG) and wrap it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(Arc::new(RasterImage::decode(bytes)?)))
    }

    /// The underlying pixel data.
    pub fn raster(&self) -> &Arc<RasterImage> {
        &self.data
    }
}

impl Drawable for ImageElement {
    fn width(&self) -> f32 {
        self.data.width as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.data.height as f32 * self.scale
    }

    fn set_max_width(&mut self, max_width: f32) {
        let intrinsic = self.data.width as f32;
        self.scale = if intrinsic > max_width && intrinsic > 0.0 {
            max_width / intrinsic
        } else {
            1.0
        };
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas<'_>,
        upper_left: Position,
        listener: &mut dyn DrawListener,
    ) -> Result<()> {
        let width = self.width();
        let height = self.height();
        canvas.draw_image(
            &self.data,
            upper_left.x,
            upper_left.y - height,
            width,
            height,
        );
        listener.drawn(upper_left, width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageRegistry;
    use crate::element::NullDrawListener;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_rgb_png() {
        let raster = RasterImage::decode(&png_bytes(4, 3)).unwrap();
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.rgb().len(), 4 * 3 * 3);
        assert!(raster.alpha().is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(RasterImage::decode(b"not an image").is_err());
    }

    #[test]
    fn test_intrinsic_size_is_pixel_size() {
        let element = ImageElement::from_bytes(&png_bytes(120, 40)).unwrap();
        assert_eq!(element.width(), 120.0);
        assert_eq!(element.height(), 40.0);
    }

    #[test]
    fn test_max_width_scales_down_preserving_aspect() {
        let mut element = ImageElement::from_bytes(&png_bytes(120, 40)).unwrap();
        element.set_max_width(60.0);
        assert_eq!(element.width(), 60.0);
        assert_eq!(element.height(), 20.0);

        // A wider constraint never scales up.
        element.set_max_width(500.0);
        assert_eq!(element.width(), 120.0);
    }

    #[test]
    fn test_draw_places_lower_left_corner() {
        let mut element = ImageElement::new(Arc::new(RasterImage::solid(10, 6, [0, 0, 0])));
        let mut registry = ImageRegistry::new();
        let mut canvas = Canvas::new(&mut registry);
        element
            .draw(
                &mut canvas,
                Position::new(100.0, 500.0),
                &mut NullDrawListener,
            )
            .unwrap();

        let ops = String::from_utf8(canvas.content().to_vec()).unwrap();
        assert!(ops.contains("10 0 0 6 100 494 cm"));
    }
}
