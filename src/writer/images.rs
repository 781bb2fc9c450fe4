//! Image XObject serialization.
//!
//! RGB samples are emitted as a FlateDecode stream; an alpha channel, when
//! present, becomes a separate DeviceGray soft-mask stream referenced via
//! `/SMask`.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::element::RasterImage;
use crate::error::Result;
use crate::writer::objects::stream_object;

/// Deflate raw samples for a FlateDecode stream.
fn flate_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Build the image XObject body, referencing `smask_id` when set.
pub(crate) fn image_object(image: &RasterImage, smask_id: Option<usize>) -> Result<Vec<u8>> {
    let data = flate_compress(image.rgb())?;
    let mut dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode ",
        image.width(),
        image.height()
    );
    if let Some(id) = smask_id {
        dict.push_str(&format!("/SMask {} 0 R ", id));
    }
    Ok(stream_object(&dict, &data))
}

/// Build the soft-mask XObject body for an image's alpha channel.
pub(crate) fn smask_object(image: &RasterImage, alpha: &[u8]) -> Result<Vec<u8>> {
    let data = flate_compress(alpha)?;
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode ",
        image.width(),
        image.height()
    );
    Ok(stream_object(&dict, &data))
}
