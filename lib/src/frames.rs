//! Multi-frame conversion
//!
//! An external decoder supplies the frames; every frame goes through the
//! same pipeline with the same settings and keeps its display delay.

use crate::config::ConversionSettings;
use crate::error::ConvertError;
use crate::processor::{ConversionResult, convert};
use image::RgbaImage;
use rayon::prelude::*;
use std::time::Duration;

/// Delay used when a frame declares none, in centiseconds
pub const DEFAULT_DELAY_CS: u32 = 100;

/// One decoded animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: RgbaImage,
    /// Display time in centiseconds, never zero
    pub delay_cs: u32,
}

impl Frame {
    /// A delay of 0 is replaced by [`DEFAULT_DELAY_CS`]
    pub fn new(image: RgbaImage, delay_cs: u32) -> Self {
        let delay_cs = if delay_cs == 0 { DEFAULT_DELAY_CS } else { delay_cs };
        Self { image, delay_cs }
    }
}

impl From<image::Frame> for Frame {
    /// Adapt a frame from one of `image`'s animation decoders
    fn from(frame: image::Frame) -> Self {
        let (numer, denom) = frame.delay().numer_denom_ms();
        let millis = numer as f64 / denom.max(1) as f64;
        let delay_cs = (millis / 10.0).round() as u32;
        Frame::new(frame.into_buffer(), delay_cs)
    }
}

/// A converted frame and how long to show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedFrame {
    pub result: ConversionResult,
    pub delay_cs: u32,
}

impl AnimatedFrame {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.delay_cs as u64 * 10)
    }
}

/// Every frame of an animation, converted, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedResult {
    frames: Vec<AnimatedFrame>,
}

impl AnimatedResult {
    pub fn frames(&self) -> &[AnimatedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// One pass over the frames; call again to restart
    pub fn iter(&self) -> std::slice::Iter<'_, AnimatedFrame> {
        self.frames.iter()
    }

    /// Endless looped playback: each frame with its display duration
    pub fn playback(&self) -> impl Iterator<Item = (&ConversionResult, Duration)> {
        self.frames.iter().cycle().map(|f| (&f.result, f.duration()))
    }

    /// Length of one loop
    pub fn total_duration(&self) -> Duration {
        self.frames.iter().map(AnimatedFrame::duration).sum()
    }
}

impl<'a> IntoIterator for &'a AnimatedResult {
    type Item = &'a AnimatedFrame;
    type IntoIter = std::slice::Iter<'a, AnimatedFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Convert every frame of an animation with the same settings
///
/// Frames are independent, so they are converted in parallel, each on its
/// own buffer. The complete set is computed before returning.
///
/// # Arguments
/// * `frames` - Decoded frames in display order
/// * `settings` - Conversion settings shared by all frames
///
/// # Returns
/// Converted frames in input order with their delays, or `EmptyInput` when
/// `frames` is empty. The first failing frame's error is returned otherwise.
pub fn convert_animated(
    frames: &[Frame],
    settings: &ConversionSettings,
) -> Result<AnimatedResult, ConvertError> {
    if frames.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    log::debug!("converting animation of {} frames", frames.len());

    let frames = frames
        .par_iter()
        .map(|frame| -> Result<AnimatedFrame, ConvertError> {
            Ok(AnimatedFrame {
                result: convert(&frame.image, settings)?,
                delay_cs: frame.delay_cs,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnimatedResult { frames })
}
