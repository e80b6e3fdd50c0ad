//! Error types for the select widget.

use thiserror::Error;

/// Errors reported by selection and layout operations.
///
/// The lenient widget API recovers from most of these on its own (clamping an
/// index, flooring a popup height) and only logs them. The `try_*` methods
/// return them to the caller instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// An index outside `-1..len` was supplied.
    #[error("index {index} is out of range for {len} items")]
    InvalidIndex { index: i32, len: usize },

    /// A `before_change` observer refused the change.
    #[error("change to index {index} was vetoed")]
    VetoedChange { index: i32 },

    /// Neither side of the anchor has room for even the minimum popup height.
    #[error("no room to lay out the popup")]
    DegenerateLayout,

    /// The operation needs at least one item.
    #[error("the item set is empty")]
    EmptyItemSet,
}

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while loading or validating a [`SelectConfig`](crate::SelectConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source could not be parsed or did not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
