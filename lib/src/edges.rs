use crate::filters::to_channel;
use image::RgbaImage;
use rayon::prelude::*;

/// Sobel edge map over all three color channels
///
/// Kernels:
/// ```text
/// Gx (horizontal):     Gy (vertical):
/// [-1  0  1]           [-1 -2 -1]
/// [-2  0  2]           [ 0  0  0]
/// [-1  0  1]           [ 1  2  1]
/// ```
/// Each channel's response is scaled by 1/3 and the three responses are
/// summed into a single gx and gy before taking the magnitude. The sum is
/// intentional; color edges between equally bright regions still register.
///
/// The magnitude is written to R, G and B with alpha 255, giving a grayscale
/// edge map. The 1-pixel border ring stays zeroed.
///
/// # Arguments
/// * `img` - Input RGBA buffer
///
/// # Returns
/// Grayscale edge map of the same size
pub fn detect_edges(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    let mut output = RgbaImage::new(width, height);
    if width < 3 || height < 3 {
        return output;
    }

    let src: &[u8] = img.as_raw();
    let stride = width as usize * 4;
    let at = |x: usize, y: usize, c: usize| src[y * stride + x * 4 + c] as f64;

    output
        .par_chunks_mut(stride)
        .enumerate()
        .skip(1)
        .take(height as usize - 2)
        .for_each(|(y, row)| {
            for x in 1..(width as usize - 1) {
                let mut gx = 0.0;
                let mut gy = 0.0;

                for c in 0..3 {
                    let nw = at(x - 1, y - 1, c);
                    let n = at(x, y - 1, c);
                    let ne = at(x + 1, y - 1, c);
                    let w = at(x - 1, y, c);
                    let e = at(x + 1, y, c);
                    let sw = at(x - 1, y + 1, c);
                    let s = at(x, y + 1, c);
                    let se = at(x + 1, y + 1, c);

                    gx += (-nw + ne - 2.0 * w + 2.0 * e - sw + se) / 3.0;
                    gy += (-nw - 2.0 * n - ne + sw + 2.0 * s + se) / 3.0;
                }

                let magnitude: f64 = (gx * gx + gy * gy).sqrt();
                let value = to_channel(magnitude);
                row[x * 4] = value;
                row[x * 4 + 1] = value;
                row[x * 4 + 2] = value;
                row[x * 4 + 3] = 255;
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([90, 30, 200, 255]));
        let edges = detect_edges(&img);

        for y in 1..5 {
            for x in 1..5 {
                assert_eq!(*edges.get_pixel(x, y), Rgba([0, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn test_border_ring_zeroed() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let edges = detect_edges(&img);

        for i in 0..4 {
            assert_eq!(*edges.get_pixel(i, 0), Rgba([0, 0, 0, 0]));
            assert_eq!(*edges.get_pixel(i, 3), Rgba([0, 0, 0, 0]));
            assert_eq!(*edges.get_pixel(0, i), Rgba([0, 0, 0, 0]));
            assert_eq!(*edges.get_pixel(3, i), Rgba([0, 0, 0, 0]));
        }
    }

    #[test]
    fn test_vertical_step_edge_magnitude() {
        // Left column dark, right columns bright red only
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        for y in 0..3 {
            img.put_pixel(2, y, Rgba([60, 0, 0, 255]));
        }
        let edges = detect_edges(&img);

        // Red channel: gx = (60 + 120 + 60) / 3 = 80, other channels 0
        assert_eq!(*edges.get_pixel(1, 1), Rgba([80, 80, 80, 255]));
    }

    #[test]
    fn test_channel_gradients_are_summed() {
        // Same step in all three channels triples the response
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        for y in 0..3 {
            img.put_pixel(2, y, Rgba([20, 20, 20, 255]));
        }
        let edges = detect_edges(&img);

        // Per channel (20 + 40 + 20) / 3 = 26.67, summed = 80
        assert_eq!(edges.get_pixel(1, 1)[0], 80);
    }

    #[test]
    fn test_strong_edge_saturates() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        for y in 0..3 {
            img.put_pixel(2, y, Rgba([255, 255, 255, 255]));
        }
        let edges = detect_edges(&img);
        assert_eq!(edges.get_pixel(1, 1)[0], 255);
    }

    #[test]
    fn test_small_buffer_all_zero() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let edges = detect_edges(&img);
        assert!(edges.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }
}
