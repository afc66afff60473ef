/// Errors surfaced by the conversion pipeline.
///
/// Only precondition violations are reported; the per-pixel math clamps every
/// intermediate value and cannot fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Target width is zero or the source image has no area.
    #[error("invalid dimensions: target width {width}, source {source_width}x{source_height}")]
    InvalidDimension {
        width: u32,
        source_width: u32,
        source_height: u32,
    },

    /// An animation was requested without any frames.
    #[error("no frames supplied for animated conversion")]
    EmptyInput,

    /// A glyph ramp needs at least one character.
    #[error("glyph ramp must contain at least one character")]
    EmptyRamp,

    /// A settings field is out of its accepted range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A color string could not be parsed as `#rrggbb`.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
}
