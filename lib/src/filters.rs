use crate::color::DisplayColor;
use crate::config::ConversionSettings;
use crate::edges::detect_edges;
use image::RgbaImage;
use rayon::prelude::*;

/// Store a computed channel value the way a clamped byte buffer does
///
/// Rounds half to even, then clamps to [0, 255].
pub fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Replace every pixel close to a key color with a replacement color
///
/// Closeness is the Euclidean distance in RGB space, inclusive of
/// `threshold`. Keyed pixels also become fully opaque.
///
/// # Arguments
/// * `img` - Buffer to modify in place
/// * `key` - Color to key out
/// * `threshold` - Maximum distance on the 0-255 scale, see
///   [`ConversionSettings::key_threshold`]
/// * `replacement` - Color written into keyed pixels
pub fn remove_background(
    img: &mut RgbaImage,
    key: DisplayColor,
    threshold: f64,
    replacement: DisplayColor,
) {
    img.par_chunks_exact_mut(4).for_each(|px| {
        let dr = px[0] as f64 - key.r as f64;
        let dg = px[1] as f64 - key.g as f64;
        let db = px[2] as f64 - key.b as f64;
        let dist = (dr * dr + dg * dg + db * db).sqrt();

        if dist <= threshold {
            px[0] = replacement.r;
            px[1] = replacement.g;
            px[2] = replacement.b;
            px[3] = 255;
        }
    });
}

/// Sharpen with a 3×3 Laplacian-style kernel
///
/// Kernel:
/// ```text
/// [ 0  -a   0 ]
/// [-a  1+4a -a]
/// [ 0  -a   0 ]
/// ```
/// applied to R, G and B independently. Processed pixels get alpha 255.
/// The 1-pixel border ring is not processed and stays zeroed in the output,
/// so buffers narrower or shorter than 3 pixels come back all zero.
///
/// # Arguments
/// * `img` - Input buffer
/// * `amount` - Sharpness amount `a` (>= 0)
///
/// # Returns
/// New buffer of the same size
pub fn sharpen(img: &RgbaImage, amount: f32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let mut output = RgbaImage::new(width, height);
    if width < 3 || height < 3 {
        return output;
    }

    let a = amount as f64;
    let kernel = [
        0.0, -a, 0.0,
        -a, 1.0 + 4.0 * a, -a,
        0.0, -a, 0.0,
    ];
    let src: &[u8] = img.as_raw();
    let stride = width as usize * 4;

    output
        .par_chunks_mut(stride)
        .enumerate()
        .skip(1)
        .take(height as usize - 2)
        .for_each(|(y, row)| {
            for x in 1..(width as usize - 1) {
                for c in 0..3 {
                    let mut sum = 0.0;
                    for ky in 0..3 {
                        for kx in 0..3 {
                            let idx = (y + ky - 1) * stride + (x + kx - 1) * 4 + c;
                            sum += src[idx] as f64 * kernel[ky * 3 + kx];
                        }
                    }
                    row[x * 4 + c] = to_channel(sum);
                }
                row[x * 4 + 3] = 255;
            }
        });

    output
}

/// Run the enabled pixel filters in their fixed order
///
/// 1. Background removal (when `remove_background` is set)
/// 2. Sharpen (when `sharpness > 0`)
/// 3. Edge detection (when `edge_detect` is set)
///
/// Each stage consumes the previous stage's output.
pub fn apply_filters(mut img: RgbaImage, settings: &ConversionSettings) -> RgbaImage {
    if settings.remove_background {
        let threshold = settings.key_threshold();
        log::trace!(
            "removing background {} (tolerance {}, distance <= {:.2})",
            settings.key_color,
            settings.tolerance,
            threshold
        );
        remove_background(&mut img, settings.key_color, threshold, settings.background_color);
    }

    if settings.sharpness > 0.0 {
        log::trace!("sharpening with amount {}", settings.sharpness);
        img = sharpen(&img, settings.sharpness);
    }

    if settings.edge_detect {
        log::trace!("detecting edges");
        img = detect_edges(&img);
    }

    img
}
