//! Per-pixel tone pipeline
//!
//! One raster-order pass over the (possibly filtered) buffer turns every
//! pixel into a glyph and a display color.

use crate::color::DisplayColor;
use crate::config::ConversionSettings;
use crate::filters::to_channel;
use crate::processor::ConversionResult;
use image::RgbaImage;

/// Floyd-Steinberg neighbors as (dx, dy, weight)
///
/// ```text
///        X   7
///    3   5   1
/// ```
const FLOYD_STEINBERG: [(i64, i64, f64); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Rec. 601 luma of an RGB triple
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Snap a channel value onto one of `levels` evenly spaced steps
///
/// Formula: floor(value / 256 * levels) * (256 / levels)
///
/// With 2 levels the only outputs are 0 and 128.
pub fn posterize(value: f64, levels: f64) -> f64 {
    (value / 256.0 * levels).floor() * (256.0 / levels)
}

/// Stretch a gray value around mid-gray and clamp it to [0, 255]
pub fn apply_contrast(gray: f64, contrast: f64) -> f64 {
    (((gray / 255.0 - 0.5) * contrast + 0.5) * 255.0).clamp(0.0, 255.0)
}

/// Scale by brightness, then push away from (or toward) the pixel's luma
fn adjust(rgb: [u8; 3], settings: &ConversionSettings) -> [f64; 3] {
    let brightness = settings.brightness as f64;
    let saturation = settings.saturation as f64;
    let [r, g, b] = rgb.map(|c| (c as f64 * brightness).clamp(0.0, 255.0));

    let gray = luma(r, g, b);
    [r, g, b].map(|c| (gray + saturation * (c - gray)).clamp(0.0, 255.0))
}

/// Add a weighted share of the quantization error to the unvisited neighbors
fn diffuse_error(img: &mut RgbaImage, x: u32, y: u32, error: [f64; 3]) {
    let (width, height) = img.dimensions();

    for (dx, dy, weight) in FLOYD_STEINBERG {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            continue;
        }

        let pixel = img.get_pixel_mut(nx as u32, ny as u32);
        for c in 0..3 {
            pixel[c] = to_channel(pixel[c] as f64 + error[c] * weight);
        }
    }
}

/// Run the tone pipeline over a whole buffer
///
/// Per pixel, in order:
/// 1. brightness multiply, clamp
/// 2. saturation around luma, clamp
/// 3. posterize to 2^bit_depth levels
/// 4. optional error diffusion of (adjusted - posterized) into later pixels
/// 5. record the posterized color
/// 6. luma of that color, contrast, optional invert
/// 7. pick the glyph
///
/// The buffer is consumed: dithering writes into pixels that have not been
/// visited yet, so the scan is strictly row-major and sequential.
///
/// # Arguments
/// * `img` - Resampled and filtered buffer
/// * `settings` - Conversion settings
///
/// # Returns
/// Glyph and color grids with one row per buffer row
pub fn apply_tone(mut img: RgbaImage, settings: &ConversionSettings) -> ConversionResult {
    let (width, height) = img.dimensions();
    let levels = settings.levels() as f64;
    let contrast = settings.contrast as f64;

    let mut glyphs = Vec::with_capacity(height as usize);
    let mut colors = Vec::with_capacity(height as usize);

    for y in 0..height {
        let mut glyph_row = Vec::with_capacity(width as usize);
        let mut color_row = Vec::with_capacity(width as usize);

        for x in 0..width {
            let p = img.get_pixel(x, y);
            let adjusted = adjust([p[0], p[1], p[2]], settings);
            let posterized = adjusted.map(|c| posterize(c, levels));

            if settings.dithering && x + 1 < width && y + 1 < height {
                let error = [
                    adjusted[0] - posterized[0],
                    adjusted[1] - posterized[1],
                    adjusted[2] - posterized[2],
                ];
                diffuse_error(&mut img, x, y, error);
            }

            let rgb = posterized.map(|c| c.floor().clamp(0.0, 255.0) as u8);
            color_row.push(DisplayColor::from(rgb));
            let [r, g, b] = rgb;

            let mut gray = apply_contrast(luma(r as f64, g as f64, b as f64), contrast);
            if settings.invert {
                gray = 255.0 - gray;
            }
            glyph_row.push(settings.ramp.glyph_for(gray));
        }

        glyphs.push(glyph_row);
        colors.push(color_row);
    }

    ConversionResult::new(glyphs, colors)
}
