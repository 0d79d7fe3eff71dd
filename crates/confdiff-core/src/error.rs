use thiserror::Error;

use crate::RenderError;

/// Errors that can occur while turning external text into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
    /// YAML mapping keys must be scalars.
    #[error("unsupported YAML key type: {found}")]
    NonScalarYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags carry application-specific types and are rejected.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// A configuration document must be a mapping at its top level.
    #[error("expected a mapping at the document root, found {found}")]
    NotAMapping {
        /// The kind of value found instead.
        found: &'static str,
    },
    /// The file extension does not correspond to a supported input format.
    #[error("unsupported file extension: {extension:?}")]
    UnsupportedExtension {
        /// The extension that was inspected, if any.
        extension: Option<String>,
    },
}

/// Raised when an output format identifier is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The identifier does not name any renderer.
    #[error("unknown output format '{0}' (expected one of: plain, tree, json)")]
    Unknown(String),
    /// The identifier does not name any input parser.
    #[error("unknown input format '{0}' (expected one of: json, yaml)")]
    UnknownInput(String),
}

/// Errors emitted when constructing [`DiffOptions`](crate::DiffOptions) or
/// [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The tree renderer needs room for its two-character state marker.
    #[error("indent width must be at least 2, got {0}")]
    IndentTooNarrow(usize),
}

/// Top-level error returned by [`diff`](crate::diff) and [`diff_str`](crate::diff_str).
#[derive(Debug, Error)]
pub enum Error {
    /// One of the inputs could not be parsed or is not a mapping.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The requested output format is unknown.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Rendering the diff failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
