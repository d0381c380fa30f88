//! Working-resolution downscaling.
//!
//! Detection and editing run on a copy whose pixel count stays near
//! `budget * budget`. Cover coordinates are stored at that resolution and
//! scaled back up on export.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target size and
/// `DecodeError::CorruptedFile` when the pixel buffer does not match the
/// source dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Size of the working copy for a `width` x `height` image.
///
/// The divisor is `ceil(sqrt(width * height) / budget)`; images already
/// within budget (divisor 1) keep their size. A zero budget disables
/// downscaling.
pub fn working_size(width: u32, height: u32, budget: u32) -> (u32, u32) {
    if budget == 0 || width == 0 || height == 0 {
        return (width, height);
    }
    let ratio = ((width as f64 * height as f64).sqrt() / budget as f64).ceil();
    if ratio <= 1.0 {
        return (width, height);
    }
    (
        ((width as f64 / ratio).round() as u32).max(1),
        ((height as f64 / ratio).round() as u32).max(1),
    )
}

/// Downscale an image to its working resolution.
pub fn to_working_resolution(
    image: &DecodedImage,
    budget: u32,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = working_size(image.width, image.height, budget);
    resize(image, width, height, FilterType::Bilinear)
}
