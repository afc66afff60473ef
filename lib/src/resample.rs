use crate::error::ConvertError;
use image::{GenericImageView, Rgba, RgbaImage, imageops};

/// Character cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f64 = 0.5;

/// Number of grid rows for a source image rendered `width` characters wide
///
/// Formula: floor(width * (source_height / source_width) * 0.5)
///
/// # Errors
/// `InvalidDimension` if `width` is zero or the source has no area
pub fn target_height(width: u32, source_width: u32, source_height: u32) -> Result<u32, ConvertError> {
    if width == 0 || source_width == 0 || source_height == 0 {
        return Err(ConvertError::InvalidDimension {
            width,
            source_width,
            source_height,
        });
    }

    let aspect = source_height as f64 / source_width as f64;
    Ok((width as f64 * aspect * CELL_ASPECT).floor() as u32)
}

/// Resample a source image onto the character grid
///
/// Any `GenericImageView` with RGBA8 pixels works as a source, so callers can
/// hand in an `RgbaImage`, a `DynamicImage` or a sub-image view.
///
/// # Arguments
/// * `source` - Decoded source image
/// * `width` - Target number of characters per row
///
/// # Returns
/// A `width × target_height` RGBA buffer, one pixel per character cell.
/// The buffer is empty when the target height rounds down to zero.
pub fn resample<I>(source: &I, width: u32) -> Result<RgbaImage, ConvertError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (source_width, source_height) = source.dimensions();
    let height = target_height(width, source_width, source_height)?;

    if height == 0 {
        return Ok(RgbaImage::new(width, 0));
    }

    // Bilinear keeps parity with a browser canvas scaled draw
    Ok(imageops::resize(
        source,
        width,
        height,
        imageops::FilterType::Triangle,
    ))
}
