use crate::color::DisplayColor;
use crate::config::ConversionSettings;
use crate::error::ConvertError;
use crate::filters::apply_filters;
use crate::resample::resample;
use crate::tone::apply_tone;
use image::{GenericImageView, Rgba};

/// Glyph grid plus the matching per-cell color grid
///
/// Every row holds exactly `width` cells and both grids have the same
/// shape. Colors are the tone pipeline's true-color values; quantization to
/// the output color mode happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    glyphs: Vec<Vec<char>>,
    colors: Vec<Vec<DisplayColor>>,
}

impl ConversionResult {
    pub(crate) fn new(glyphs: Vec<Vec<char>>, colors: Vec<Vec<DisplayColor>>) -> Self {
        debug_assert_eq!(glyphs.len(), colors.len());
        debug_assert!(glyphs.iter().zip(&colors).all(|(g, c)| g.len() == c.len()));
        Self { glyphs, colors }
    }

    pub fn glyphs(&self) -> &[Vec<char>] {
        &self.glyphs
    }

    pub fn colors(&self) -> &[Vec<DisplayColor>] {
        &self.colors
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of columns (0 for an empty result)
    pub fn width(&self) -> usize {
        self.glyphs.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterate rows as (glyphs, colors) pairs
    pub fn rows(&self) -> impl Iterator<Item = (&[char], &[DisplayColor])> {
        self.glyphs
            .iter()
            .zip(&self.colors)
            .map(|(g, c)| (g.as_slice(), c.as_slice()))
    }
}

/// Converts a decoded image into a glyph grid and a color grid
///
/// Pipeline:
/// 1. Validate settings
/// 2. Resample to `width × floor(width * aspect * 0.5)`
/// 3. Pixel filters: background removal, sharpen, edge detection
/// 4. Tone pipeline: brightness, saturation, posterize, dither, contrast,
///    invert, glyph lookup
///
/// # Arguments
/// * `source` - Any RGBA8 image view (`RgbaImage`, `DynamicImage`, sub-image)
/// * `settings` - Conversion settings
///
/// # Returns
/// The conversion result, or `InvalidDimension` for a zero width or an
/// empty source. A target height of zero gives an empty result.
pub fn convert<I>(source: &I, settings: &ConversionSettings) -> Result<ConversionResult, ConvertError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    settings.validate()?;

    let buffer = resample(source, settings.width)?;
    let (width, height) = buffer.dimensions();
    log::debug!(
        "converting {}x{} source to {}x{} cells (background: {}, sharpness: {}, edges: {}, dithering: {})",
        source.width(),
        source.height(),
        width,
        height,
        settings.remove_background,
        settings.sharpness,
        settings.edge_detect,
        settings.dithering
    );

    if height == 0 {
        return Ok(ConversionResult::default());
    }

    let filtered = apply_filters(buffer, settings);
    Ok(apply_tone(filtered, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorMode;
    use crate::ramp::{GlyphRamp, RampStyle};
    use image::RgbaImage;

    fn photo(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 5 % 256) as u8, (y * 7 % 256) as u8, ((x + y) % 256) as u8, 255])
        })
    }

    #[test]
    fn test_white_square_end_to_end() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let settings = ConversionSettings {
            width: 2,
            ramp: GlyphRamp::preset(RampStyle::Simple),
            ..Default::default()
        };

        let result = convert(&img, &settings).unwrap();
        assert_eq!(result.glyphs(), &[vec!['@', '@']]);
        assert_eq!(result.colors(), &[vec![DisplayColor::WHITE; 2]]);
    }

    #[test]
    fn test_grid_shape_matches_height_formula() {
        let img = photo(200, 100);
        let settings = ConversionSettings {
            width: 60,
            ..Default::default()
        };

        let result = convert(&img, &settings).unwrap();
        // floor(60 * 0.5 * 0.5) = 15
        assert_eq!(result.height(), 15);
        assert_eq!(result.width(), 60);
        for (glyphs, colors) in result.rows() {
            assert_eq!(glyphs.len(), 60);
            assert_eq!(colors.len(), 60);
        }
    }

    #[test]
    fn test_square_source_80_wide() {
        let result = convert(&photo(100, 100), &ConversionSettings::default()).unwrap();
        assert_eq!(result.height(), 40);
    }

    #[test]
    fn test_idempotent() {
        let img = photo(90, 60);
        let settings = ConversionSettings {
            width: 30,
            sharpness: 0.8,
            dithering: true,
            bit_depth: 3,
            edge_detect: true,
            remove_background: true,
            color_mode: ColorMode::TrueColor,
            ..Default::default()
        };

        let a = convert(&img, &settings).unwrap();
        let b = convert(&img, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_width_rejected() {
        let settings = ConversionSettings {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            convert(&photo(10, 10), &settings),
            Err(ConvertError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_empty_source_rejected() {
        let img = RgbaImage::new(0, 0);
        assert!(matches!(
            convert(&img, &ConversionSettings::default()),
            Err(ConvertError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_zero_height_gives_empty_result() {
        // floor(1 * 0.1 * 0.5) = 0
        let settings = ConversionSettings {
            width: 1,
            ..Default::default()
        };
        let result = convert(&photo(10, 1), &settings).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.width(), 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ConversionSettings {
            bit_depth: 12,
            ..Default::default()
        };
        assert!(matches!(
            convert(&photo(10, 10), &settings),
            Err(ConvertError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_dynamic_image_source() {
        let img = image::DynamicImage::ImageRgba8(photo(40, 40));
        let settings = ConversionSettings {
            width: 20,
            ..Default::default()
        };
        assert_eq!(convert(&img, &settings).unwrap().height(), 10);
    }

    #[test]
    fn test_background_keyed_to_black_renders_darkest_glyph() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([250, 252, 255, 255]));
        let settings = ConversionSettings {
            width: 4,
            remove_background: true,
            tolerance: 10.0,
            ramp: GlyphRamp::preset(RampStyle::Simple),
            ..Default::default()
        };

        let result = convert(&img, &settings).unwrap();
        assert!(result.glyphs().iter().flatten().all(|&g| g == ' '));
        assert!(result.colors().iter().flatten().all(|&c| c == DisplayColor::BLACK));
    }
}
