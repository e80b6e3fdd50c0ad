//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while preparing drawing resources.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A color string could not be parsed as hex.
    #[error("invalid color value: {value:?}")]
    InvalidColor { value: String },

    /// A font size was zero, negative or not finite.
    #[error("invalid font size: {size}")]
    InvalidFontSize { size: f32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
