use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use strum_macros::{Display, EnumString};

use super::error::{MergeError, Result};

/// Fixed JPEG quality factor for every export.
pub const JPEG_QUALITY: u8 = 95;

/// Output encodings selectable through the save path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Derive the format from a save path, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg") | Some("jpeg") => Ok(Self::Jpeg),
            _ => Err(MergeError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Write the composite to `path`, choosing the encoder by extension.
///
/// PNG keeps the alpha channel intact. JPEG cannot represent alpha, so the
/// composite is flattened onto an opaque white background before encoding
/// at quality 95.
pub fn save_composite(image: &RgbaImage, path: &Path) -> Result<()> {
    let encode_err = |source| MergeError::Encode {
        path: path.to_path_buf(),
        source,
    };

    match OutputFormat::from_path(path)? {
        OutputFormat::Png => image.save(path).map_err(encode_err),
        OutputFormat::Jpeg => {
            let flattened = flatten_onto_white(image);
            let file = File::create(path)
                .map_err(|source| encode_err(image::ImageError::IoError(source)))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
            flattened.write_with_encoder(encoder).map_err(encode_err)
        }
    }
}

/// Alpha-composite the image over an opaque white sheet.
fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let a = u16::from(a);
        let over_white = |src: u8| ((u16::from(src) * a + 255 * (255 - a)) / 255) as u8;
        out.put_pixel(x, y, Rgb([over_white(r), over_white(g), over_white(b)]));
    }
    out
}
