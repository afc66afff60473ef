/// Basic example: Convert a synthetic test image to glyphs
///
/// Draws a few shapes, converts them with true-color output, prints the
/// result to the terminal and saves the raster and HTML exports.
use glyphcast::{ColorMode, ConversionSettings, GlyphRamp, RampStyle, convert, render};
use image::{Rgba, RgbaImage};

fn main() {
    env_logger::init();

    println!("glyphcast - Basic Example");
    println!("=========================\n");

    let width = 160;
    let height = 160;

    // Gray background with a vertical blue gradient
    let mut img = RgbaImage::from_fn(width, height, |_, y| {
        Rgba([100, 100, 100 + (y * 155 / height) as u8, 255])
    });

    // White disc with a black ring in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            } else if (dist - radius).abs() < 5.0 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    // Red diagonal
    for i in 0..width {
        img.put_pixel(i, i, Rgba([255, 0, 0, 255]));
        if i > 0 {
            img.put_pixel(i - 1, i, Rgba([255, 0, 0, 255]));
            img.put_pixel(i, i - 1, Rgba([255, 0, 0, 255]));
        }
    }

    println!("Created test image: {}x{}", width, height);

    let settings = ConversionSettings {
        width: 64,
        contrast: 1.2,
        sharpness: 0.5,
        bit_depth: 4,
        dithering: true,
        ramp: GlyphRamp::preset(RampStyle::Simple),
        color_mode: ColorMode::TrueColor,
        ..Default::default()
    };

    println!("Processing with settings:");
    println!("  - Width: {}", settings.width);
    println!("  - Contrast: {}", settings.contrast);
    println!("  - Sharpness: {}", settings.sharpness);
    println!("  - Bit depth: {}", settings.bit_depth);
    println!("  - Dithering: {}", settings.dithering);
    println!();

    let result = match convert(&img, &settings) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            std::process::exit(1);
        }
    };

    print!("{}", render::to_ansi(&result, &settings.color_mode));

    img.save("basic_input.png").expect("Failed to save input");
    render::to_image(&result, &settings)
        .save("basic_output.png")
        .expect("Failed to save output");
    std::fs::write(
        "basic_output.html",
        render::to_html_document(&result, &settings, "basic"),
    )
    .expect("Failed to save HTML");

    println!("\n✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: basic_output.png");
    println!("✓ Saved HTML to:   basic_output.html");
    println!("\nConversion complete: {}x{} cells", result.width(), result.height());
}
