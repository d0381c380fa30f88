//! Photo and artwork decoding.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{Artwork, DecodeError, DecodedImage};

/// Decode a photo (JPEG or PNG) to RGB, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` when the format cannot be guessed
/// and `DecodeError::CorruptedFile` when decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    let rgb = orientation.apply(img).into_rgb8();
    checked_dimensions(rgb.width(), rgb.height())?;
    Ok(DecodedImage::from_rgb_image(rgb))
}

/// Decode cover artwork (typically a PNG with transparency) to RGBA.
pub fn decode_artwork(bytes: &[u8]) -> Result<Artwork, DecodeError> {
    let rgba = read_dynamic(bytes)?.into_rgba8();
    checked_dimensions(rgba.width(), rgba.height())?;
    Ok(Artwork::from_rgba_image(rgba))
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn checked_dimensions(width: u32, height: u32) -> Result<(), DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// EXIF orientation as a horizontal mirror followed by clockwise quarter
/// turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ExifOrientation {
    mirror: bool,
    quarter_turns: u8,
}

impl ExifOrientation {
    /// From the EXIF tag value (1-8); anything else is upright.
    fn from_tag(tag: u32) -> Self {
        let (mirror, quarter_turns) = match tag {
            2 => (true, 0),
            3 => (false, 2),
            4 => (true, 2),
            5 => (true, 3),
            6 => (false, 1),
            7 => (true, 1),
            8 => (false, 3),
            _ => (false, 0),
        };
        Self { mirror, quarter_turns }
    }

    fn apply(self, img: DynamicImage) -> DynamicImage {
        let img = if self.mirror { img.fliph() } else { img };
        match self.quarter_turns {
            1 => img.rotate90(),
            2 => img.rotate180(),
            3 => img.rotate270(),
            _ => img,
        }
    }
}

/// Orientation of the primary image; upright when EXIF is absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> ExifOrientation {
    let Ok(exif) = Reader::new().read_from_container(&mut Cursor::new(bytes)) else {
        return ExifOrientation::default();
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(ExifOrientation::from_tag)
        .unwrap_or_default()
}
