//! Rendering and export of conversion results
//!
//! Plain text, HTML, ANSI terminal sequences and a raster image. This is
//! the only place the color quantizer is applied.

use crate::color::{ColorMode, DisplayColor, nearest_ansi16, quantize_color};
use crate::config::ConversionSettings;
use crate::frames::AnimatedResult;
use crate::processor::ConversionResult;
use crate::ramp::GlyphRamp;
use image::{Rgba, RgbaImage};
use std::fmt::Write;

/// Raster cell size in pixels; glyph bitmaps are 8×8, doubled vertically
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;
/// Blank margin around the raster grid
pub const PADDING: u32 = 20;

const RESET: &str = "\x1b[0m";

/// 4×4 ordered-dither thresholds (0-15) for glyphs without a bitmap
const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

impl ConversionResult {
    /// Plain text, every row terminated by a newline
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for row in self.glyphs() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl AnimatedResult {
    /// All frames as text, each under a header giving its delay in ms
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, frame) in self.iter().enumerate() {
            // Writing into a String cannot fail
            let _ = writeln!(
                out,
                "=== Frame {} (delay: {}ms) ===",
                i + 1,
                frame.delay_cs * 10
            );
            out.push_str(&frame.result.to_text());
            out.push_str("\n\n");
        }
        out
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

/// HTML markup for the grid, ready to sit inside a `<pre>`
///
/// Per-cell modes wrap every glyph in a colored `<span>`; flat modes return
/// escaped text and leave coloring to the container. Rows are separated by
/// newlines with no trailing newline.
pub fn to_html_fragment(result: &ConversionResult, mode: &ColorMode) -> String {
    let mut out = String::new();

    for (y, (glyphs, colors)) in result.rows().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for (&ch, &color) in glyphs.iter().zip(colors) {
            if mode.is_per_cell() {
                let _ = write!(out, "<span style=\"color:{}\">", quantize_color(color, mode));
                push_escaped(&mut out, ch);
                out.push_str("</span>");
            } else {
                push_escaped(&mut out, ch);
            }
        }
    }

    out
}

/// Standalone HTML page showing the grid on the background color
pub fn to_html_document(result: &ConversionResult, settings: &ConversionSettings, title: &str) -> String {
    let text_color = settings
        .color_mode
        .flat_color()
        .unwrap_or(DisplayColor::WHITE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ASCII Art - {title}</title>
    <style>
        body {{
            background: {background};
            margin: 0;
            padding: 20px;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
        }}
        pre {{
            font-family: 'Courier New', monospace;
            font-size: 8px;
            line-height: 8px;
            white-space: pre;
            margin: 0;
            color: {color};
        }}
    </style>
</head>
<body>
    <pre>{body}</pre>
</body>
</html>
"#,
        title = escape_html(title),
        background = settings.background_color.to_hex(),
        color = text_color.to_hex(),
        body = to_html_fragment(result, &settings.color_mode),
    )
}

/// SGR parameters selecting `color` as the foreground in the given mode
fn sgr_foreground(color: DisplayColor, mode: &ColorMode) -> String {
    match mode {
        ColorMode::Ansi16 => {
            let (index, _) = nearest_ansi16(color);
            let code = if index < 8 { 30 + index } else { 90 + index - 8 };
            format!("\x1b[{}m", code)
        }
        _ => {
            let c = quantize_color(color, mode);
            format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
        }
    }
}

/// Grid as terminal text with ANSI color escapes
///
/// True-color mode emits 24-bit sequences, ANSI-16 mode the classic 30-37 /
/// 90-97 codes, flat modes a single 24-bit sequence per row. A new sequence
/// is only emitted when the color changes along a row. Every row ends with a
/// reset and a newline.
pub fn to_ansi(result: &ConversionResult, mode: &ColorMode) -> String {
    let mut out = String::new();

    for (glyphs, colors) in result.rows() {
        let mut last: Option<DisplayColor> = None;

        for (&ch, &color) in glyphs.iter().zip(colors) {
            let shown = quantize_color(color, mode);
            if last != Some(shown) {
                out.push_str(&sgr_foreground(color, mode));
                last = Some(shown);
            }
            out.push(ch);
        }

        out.push_str(RESET);
        out.push('\n');
    }

    out
}

/// Whether pixel (x, y) of an 8×8 cell is inked for this glyph
///
/// Bitmaps exist for the common ramp punctuation; any other glyph is drawn
/// as an ordered-dither pattern whose density follows `coverage` (0.0-1.0).
fn glyph_mask(ch: char, coverage: f32, x: u32, y: u32) -> bool {
    match ch {
        ' ' => false,

        '|' => x == 3 || x == 4,

        '-' | '_' | '~' => y == 3 || y == 4,

        '/' => {
            let expected_x = 7 - y;
            x == expected_x || x == expected_x.saturating_sub(1)
        }

        '\\' => x == y || x == y.saturating_sub(1),

        '.' | '·' => (3..=4).contains(&x) && (3..=4).contains(&y),

        ':' => (3..=4).contains(&x) && (y == 2 || y == 5),

        '=' => y == 2 || y == 5,

        '+' => (x == 3 || x == 4) || (y == 3 || y == 4),

        '*' => (x == 3 || x == 4) || (y == 3 || y == 4) || (x == y) || (x == 7 - y),

        '#' => (x == 2 || x == 5) || (y == 2 || y == 5),

        '%' => (x + y == 7) || (x == 1 && y == 1) || (x == 6 && y == 6),

        '@' => {
            let dx = x as i32 - 3;
            let dy = y as i32 - 3;
            dx * dx + dy * dy <= 12
        }

        '█' => true,

        _ => {
            let threshold = BAYER_4X4[(y % 4) as usize][(x % 4) as usize] as f32;
            threshold < coverage * 16.0
        }
    }
}

/// Position of a glyph along the ramp as 0.0-1.0; glyphs outside the ramp
/// count as fully inked
fn ramp_coverage(ramp: &GlyphRamp, ch: char) -> f32 {
    let last = ramp.len().saturating_sub(1).max(1) as f32;
    ramp.glyphs()
        .iter()
        .position(|&g| g == ch)
        .map_or(1.0, |i| i as f32 / last)
}

/// Draw the grid into an RGBA image
///
/// The canvas is filled with the background color, and each glyph is drawn
/// into an 8×16 cell in its quantized color.
///
/// # Arguments
/// * `result` - Conversion result to draw
/// * `settings` - Supplies the color mode, background color and ramp
///
/// # Returns
/// Image of `(cols * 8 + 40) × (rows * 16 + 40)` pixels
pub fn to_image(result: &ConversionResult, settings: &ConversionSettings) -> RgbaImage {
    let cols = result.width() as u32;
    let rows = result.height() as u32;
    let bg = settings.background_color;

    let mut output = RgbaImage::from_pixel(
        cols * CELL_WIDTH + PADDING * 2,
        rows * CELL_HEIGHT + PADDING * 2,
        Rgba([bg.r, bg.g, bg.b, 255]),
    );

    for (cell_y, (glyphs, colors)) in result.rows().enumerate() {
        for (cell_x, (&ch, &color)) in glyphs.iter().zip(colors).enumerate() {
            let ink = quantize_color(color, &settings.color_mode);
            let ink = Rgba([ink.r, ink.g, ink.b, 255]);
            let coverage = ramp_coverage(&settings.ramp, ch);

            let origin_x = PADDING + cell_x as u32 * CELL_WIDTH;
            let origin_y = PADDING + cell_y as u32 * CELL_HEIGHT;

            for local_y in 0..CELL_HEIGHT {
                for local_x in 0..CELL_WIDTH {
                    if glyph_mask(ch, coverage, local_x, local_y / 2) {
                        output.put_pixel(origin_x + local_x, origin_y + local_y, ink);
                    }
                }
            }
        }
    }

    output
}
