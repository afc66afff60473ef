//! Glyph ramps
//!
//! A ramp is an ordered character set running from the glyph used for the
//! darkest intensity to the one used for the brightest. The presets mirror
//! the character sets users pick from in the converter front-end.

use crate::error::ConvertError;
use std::str::FromStr;

/// Named character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampStyle {
    #[default]
    Standard,
    Detailed,
    Simple,
    Blocks,
    Binary,
    Minimal,
    Retro,
    Matrix,
    Emoji,
}

impl RampStyle {
    pub const ALL: [RampStyle; 9] = [
        RampStyle::Standard,
        RampStyle::Detailed,
        RampStyle::Simple,
        RampStyle::Blocks,
        RampStyle::Binary,
        RampStyle::Minimal,
        RampStyle::Retro,
        RampStyle::Matrix,
        RampStyle::Emoji,
    ];

    /// Characters of this preset, darkest first
    pub fn chars(self) -> &'static str {
        match self {
            RampStyle::Standard => {
                " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$"
            }
            RampStyle::Detailed => {
                " .'`^\",:;-_+<>i!lI?/\\|()1{}[]rcvunxzjftLCJUYXZO0Qoahkbdpqwm*WMB8&%$#@"
            }
            RampStyle::Simple => " .:-=+*#%@",
            RampStyle::Blocks => " ░▒▓█",
            RampStyle::Binary => " 01",
            RampStyle::Minimal => " .·:∴",
            RampStyle::Retro => " .:!*oe&#%@",
            RampStyle::Matrix => " .:-=+*#ﾊﾐﾋｰｳｼﾅﾓﾆｻﾜﾂｵﾘｱﾎﾃﾏｹﾒｴｶｷﾑﾕﾗｾﾈｽﾀﾇﾍ",
            RampStyle::Emoji => " 🌑🌘🌗🌖🌕",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RampStyle::Standard => "standard",
            RampStyle::Detailed => "detailed",
            RampStyle::Simple => "simple",
            RampStyle::Blocks => "blocks",
            RampStyle::Binary => "binary",
            RampStyle::Minimal => "minimal",
            RampStyle::Retro => "retro",
            RampStyle::Matrix => "matrix",
            RampStyle::Emoji => "emoji",
        }
    }
}

impl FromStr for RampStyle {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RampStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConvertError::InvalidSettings(format!("unknown ramp style '{}'", s)))
    }
}

/// An ordered, non-empty sequence of glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from a string, one glyph per Unicode scalar value
    pub fn new(chars: &str) -> Result<Self, ConvertError> {
        let glyphs: Vec<char> = chars.chars().collect();
        if glyphs.is_empty() {
            return Err(ConvertError::EmptyRamp);
        }
        Ok(Self { glyphs })
    }

    pub fn preset(style: RampStyle) -> Self {
        Self {
            glyphs: style.chars().chars().collect(),
        }
    }

    /// Custom ramp, or the standard preset when `chars` is empty
    pub fn custom_or_standard(chars: &str) -> Self {
        Self::new(chars).unwrap_or_else(|_| Self::preset(RampStyle::Standard))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// A constructed ramp is never empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Map an intensity in [0, 255] to a glyph
    ///
    /// Index = floor((intensity / 255) * (len - 1)), so only a full 255
    /// reaches the last glyph.
    pub fn glyph_for(&self, intensity: f64) -> char {
        let last = self.glyphs.len() - 1;
        let t = (intensity / 255.0).clamp(0.0, 1.0);
        let index = ((t * last as f64).floor() as usize).min(last);
        self.glyphs[index]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::preset(RampStyle::Standard)
    }
}

impl FromStr for GlyphRamp {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
