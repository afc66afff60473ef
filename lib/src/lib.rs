//! glyphcast - image and animation to glyph-art converter
//!
//! Turns a decoded image into a grid of characters plus a matching grid of
//! colors, and exports the result as text, HTML, ANSI terminal output or a
//! raster image.
//!
//! # Example
//! ```no_run
//! use glyphcast::{convert, render, ColorMode, ConversionSettings};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let settings = ConversionSettings {
//!     width: 100,
//!     color_mode: ColorMode::TrueColor,
//!     ..Default::default()
//! };
//! let result = convert(&input, &settings).unwrap();
//! print!("{}", render::to_ansi(&result, &settings.color_mode));
//! render::to_image(&result, &settings).save("glyphs.png").unwrap();
//! ```

pub mod color;
pub mod config;
pub mod edges;
pub mod error;
pub mod filters;
pub mod frames;
pub mod processor;
pub mod ramp;
pub mod render;
pub mod resample;
pub mod tone;

// Re-export main types for convenience
pub use color::{ColorMode, DisplayColor, NamedColor, quantize_color};
pub use config::ConversionSettings;
pub use error::ConvertError;
pub use frames::{AnimatedFrame, AnimatedResult, Frame, convert_animated};
pub use processor::{ConversionResult, convert};
pub use ramp::{GlyphRamp, RampStyle};
