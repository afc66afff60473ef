use crate::color::{ColorMode, DisplayColor};
use crate::error::ConvertError;
use crate::ramp::GlyphRamp;

/// Settings for one conversion call
///
/// Passed by reference into every conversion; nothing in the pipeline keeps
/// or mutates it between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    /// Output grid
    pub width: u32,              // characters per row, default 80

    /// Tone
    pub contrast: f32,           // multiplier around mid-gray, default 1.0
    pub brightness: f32,         // channel multiplier, default 1.0
    pub saturation: f32,         // 0 = grayscale, default 1.0
    pub sharpness: f32,          // >= 0, 0 disables the sharpen pass
    pub bit_depth: u8,           // 1-8, posterization levels = 2^bit_depth
    pub invert: bool,            // default false
    pub dithering: bool,         // Floyd-Steinberg error diffusion, default false

    /// Glyphs
    pub ramp: GlyphRamp,         // darkest to brightest, default standard preset

    /// Colors
    pub color_mode: ColorMode,          // default monochrome
    pub background_color: DisplayColor, // default black

    /// Filters
    pub edge_detect: bool,        // default false
    pub remove_background: bool,  // default false
    pub key_color: DisplayColor,  // color keyed out, default white
    pub tolerance: f32,           // 0-100, default 30
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            // Output grid
            width: 80,

            // Tone
            contrast: 1.0,
            brightness: 1.0,
            saturation: 1.0,
            sharpness: 0.0,
            bit_depth: 8,
            invert: false,
            dithering: false,

            // Glyphs
            ramp: GlyphRamp::default(),

            // Colors
            color_mode: ColorMode::Monochrome,
            background_color: DisplayColor::BLACK,

            // Filters
            edge_detect: false,
            remove_background: false,
            key_color: DisplayColor::WHITE,
            tolerance: 30.0,
        }
    }
}

impl ConversionSettings {
    /// Validates the settings
    ///
    /// The multipliers are unbounded but must be finite; everything the
    /// per-pixel math relies on (bit depth, ramp, tolerance) is range checked
    /// here so the hot loop never has to. A zero width is reported by the
    /// resampler as [`ConvertError::InvalidDimension`].
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !(1..=8).contains(&self.bit_depth) {
            return Err(ConvertError::InvalidSettings(format!(
                "bit_depth must be between 1 and 8, got {}",
                self.bit_depth
            )));
        }
        for (name, value) in [
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("saturation", self.saturation),
        ] {
            if !value.is_finite() {
                return Err(ConvertError::InvalidSettings(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if !self.sharpness.is_finite() || self.sharpness < 0.0 {
            return Err(ConvertError::InvalidSettings(format!(
                "sharpness must be >= 0, got {}",
                self.sharpness
            )));
        }
        if !(0.0..=100.0).contains(&self.tolerance) {
            return Err(ConvertError::InvalidSettings(format!(
                "tolerance must be between 0 and 100, got {}",
                self.tolerance
            )));
        }
        if self.ramp.is_empty() {
            return Err(ConvertError::EmptyRamp);
        }
        Ok(())
    }

    /// Posterization levels, 2^bit_depth
    pub fn levels(&self) -> u32 {
        1 << self.bit_depth
    }

    /// Background keying threshold on the 0-255 Euclidean scale
    pub fn key_threshold(&self) -> f64 {
        self.tolerance as f64 * 2.55
    }
}
