//! Display colors and the color quantizer
//!
//! The tone pipeline records a true-color value for every cell. Those values
//! are only reduced to the requested output representation when a result is
//! rendered or exported, through [`quantize_color`].

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const BLACK: DisplayColor = DisplayColor::new(0, 0, 0);
    pub const WHITE: DisplayColor = DisplayColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, handy for `image::Rgba` construction
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space
    pub fn distance_sq(self, other: DisplayColor) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for DisplayColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for DisplayColor {
    type Err = ConvertError;

    /// Parses `#rrggbb` or `rrggbb` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ConvertError::InvalidColor(s.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Built-in flat colors selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    /// Classic phosphor green, `#00ff00`
    Green,
}

impl NamedColor {
    pub fn color(self) -> DisplayColor {
        match self {
            NamedColor::Green => DisplayColor::new(0, 255, 0),
        }
    }
}

/// How glyphs are colored when a result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Every glyph in white
    #[default]
    Monochrome,
    /// Every glyph in one built-in color
    Named(NamedColor),
    /// Every glyph in a user-chosen color
    Custom(DisplayColor),
    /// Each glyph in its own cell's computed color
    TrueColor,
    /// Each glyph in the nearest entry of [`ANSI_16_PALETTE`]
    Ansi16,
}

impl ColorMode {
    /// Whether rendering reads the per-cell color grid
    pub fn is_per_cell(&self) -> bool {
        matches!(self, ColorMode::TrueColor | ColorMode::Ansi16)
    }

    /// The single color used by flat modes, `None` for per-cell modes
    pub fn flat_color(&self) -> Option<DisplayColor> {
        match *self {
            ColorMode::Monochrome => Some(DisplayColor::WHITE),
            ColorMode::Named(named) => Some(named.color()),
            ColorMode::Custom(color) => Some(color),
            ColorMode::TrueColor | ColorMode::Ansi16 => None,
        }
    }
}

/// The standard 16 terminal colors: the eight normal entries followed by
/// their bright variants, in SGR order.
pub const ANSI_16_PALETTE: [DisplayColor; 16] = [
    DisplayColor::new(0, 0, 0),       // black
    DisplayColor::new(128, 0, 0),     // red
    DisplayColor::new(0, 128, 0),     // green
    DisplayColor::new(128, 128, 0),   // yellow
    DisplayColor::new(0, 0, 128),     // blue
    DisplayColor::new(128, 0, 128),   // magenta
    DisplayColor::new(0, 128, 128),   // cyan
    DisplayColor::new(192, 192, 192), // white
    DisplayColor::new(128, 128, 128), // bright black
    DisplayColor::new(255, 0, 0),     // bright red
    DisplayColor::new(0, 255, 0),     // bright green
    DisplayColor::new(255, 255, 0),   // bright yellow
    DisplayColor::new(0, 0, 255),     // bright blue
    DisplayColor::new(255, 0, 255),   // bright magenta
    DisplayColor::new(0, 255, 255),   // bright cyan
    DisplayColor::new(255, 255, 255), // bright white
];

/// Find the nearest palette entry by Euclidean RGB distance
///
/// Ties resolve to the entry declared first.
///
/// # Returns
/// The palette index together with its color
pub fn nearest_ansi16(color: DisplayColor) -> (usize, DisplayColor) {
    let mut best_index = 0;
    let mut best_dist = u32::MAX;

    for (i, &candidate) in ANSI_16_PALETTE.iter().enumerate() {
        let dist = color.distance_sq(candidate);
        if dist < best_dist {
            best_dist = dist;
            best_index = i;
        }
    }

    (best_index, ANSI_16_PALETTE[best_index])
}

/// Reduce a cell's computed color to what the given mode displays
///
/// # Arguments
/// * `color` - The cell's true-color value from the tone pipeline
/// * `mode` - Output color mode (custom colors travel inside the mode)
///
/// # Returns
/// The color the glyph should be drawn in
pub fn quantize_color(color: DisplayColor, mode: &ColorMode) -> DisplayColor {
    match *mode {
        ColorMode::Monochrome => DisplayColor::WHITE,
        ColorMode::Named(named) => named.color(),
        ColorMode::Custom(custom) => custom,
        ColorMode::TrueColor => color,
        ColorMode::Ansi16 => nearest_ansi16(color).1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(DisplayColor::new(12, 0, 255).to_string(), "rgb(12,0,255)");
    }

    #[test]
    fn test_hex_round_trip() {
        let color: DisplayColor = "#00FF7f".parse().unwrap();
        assert_eq!(color, DisplayColor::new(0, 255, 127));
        assert_eq!(color.to_hex(), "#00ff7f");

        let bare: DisplayColor = "102030".parse().unwrap();
        assert_eq!(bare, DisplayColor::new(16, 32, 48));
    }

    #[test]
    fn test_from_channel_array() {
        let color = DisplayColor::from([1, 2, 3]);
        assert_eq!(color, DisplayColor::new(1, 2, 3));
        assert_eq!(color.channels(), [1, 2, 3]);
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!("#fff".parse::<DisplayColor>().is_err());
        assert!("#gg0000".parse::<DisplayColor>().is_err());
        assert!("#00ff00aa".parse::<DisplayColor>().is_err());
        assert!("#ééé".parse::<DisplayColor>().is_err());
        assert!("#+1+2+3".parse::<DisplayColor>().is_err());
        assert!("+1+2+3".parse::<DisplayColor>().is_err());
    }

    #[test]
    fn test_ansi_black_stays_black() {
        let out = quantize_color(DisplayColor::BLACK, &ColorMode::Ansi16);
        assert_eq!(out.to_string(), "rgb(0,0,0)");
    }

    #[test]
    fn test_ansi_near_red_is_bright_red() {
        let out = quantize_color(DisplayColor::new(254, 1, 1), &ColorMode::Ansi16);
        assert_eq!(out.to_string(), "rgb(255,0,0)");
        assert_eq!(nearest_ansi16(DisplayColor::new(254, 1, 1)).0, 9);
    }

    #[test]
    fn test_ansi_tie_takes_first_entry() {
        // (64,0,0) is exactly between black and red; black is declared first
        let (index, color) = nearest_ansi16(DisplayColor::new(64, 0, 0));
        assert_eq!(index, 0);
        assert_eq!(color, DisplayColor::BLACK);
    }

    #[test]
    fn test_ansi_always_palette_member() {
        for v in (0..=255u16).step_by(17) {
            let c = DisplayColor::new(v as u8, (255 - v) as u8, (v / 2) as u8);
            let q = quantize_color(c, &ColorMode::Ansi16);
            assert!(ANSI_16_PALETTE.contains(&q));
        }
    }

    #[test]
    fn test_flat_modes_ignore_cell_color() {
        let cell = DisplayColor::new(10, 20, 30);
        let custom = DisplayColor::new(1, 2, 3);

        assert_eq!(quantize_color(cell, &ColorMode::Monochrome), DisplayColor::WHITE);
        assert_eq!(
            quantize_color(cell, &ColorMode::Named(NamedColor::Green)),
            DisplayColor::new(0, 255, 0)
        );
        assert_eq!(quantize_color(cell, &ColorMode::Custom(custom)), custom);
        assert_eq!(quantize_color(cell, &ColorMode::TrueColor), cell);
    }

    #[test]
    fn test_is_per_cell() {
        assert!(ColorMode::TrueColor.is_per_cell());
        assert!(ColorMode::Ansi16.is_per_cell());
        assert!(!ColorMode::Monochrome.is_per_cell());
        assert_eq!(ColorMode::Ansi16.flat_color(), None);
    }
}
