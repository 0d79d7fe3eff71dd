//! Structural diffing for hierarchical configuration documents.
//!
//! `confdiff-core` compares two JSON or YAML documents key by key and
//! produces a [`Diff`] tree tagging every key as nested, unchanged, changed,
//! added, or deleted. The tree can be rendered as plain sentences, as a
//! brace-delimited tree, or as JSON, and applied back onto the original
//! document.
//!
//! ```
//! use confdiff_core::{diff_str, InputFormat, OutputFormat};
//!
//! fn main() -> Result<(), confdiff_core::Error> {
//!     let rendered = diff_str(
//!         "{\"a\":1,\"b\":2}",
//!         InputFormat::Json,
//!         "a: 1\nb: 3\nc: 4\n",
//!         InputFormat::Yaml,
//!         OutputFormat::Plain,
//!     )?;
//!     assert_eq!(
//!         rendered,
//!         "Property 'b' was changed from 2 to 3\nProperty 'c' was added with value: 4"
//!     );
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod number;
mod options;
mod parse;
mod patch;
pub mod render;
mod value;

pub use diff::{Diff, DiffNode, NodeState};
pub use error::{Error, FormatError, OptionsError, ParseError};
pub use number::Number;
pub use options::{DiffOptions, KeyOrder};
pub use parse::InputFormat;
pub use patch::PatchError;
pub use render::{OutputFormat, RenderConfig, RenderError};
pub use value::{Mapping, Value};

/// Compares two parsed documents and renders the result.
///
/// Both documents must be mappings at their root.
///
/// ```
/// # use confdiff_core::{diff, OutputFormat, Value};
/// let before = Value::from_json_str("{\"x\":{\"y\":1}}")?;
/// let after = Value::from_json_str("{\"x\":{\"y\":2}}")?;
/// let rendered = diff(&before, &after, OutputFormat::Plain)?;
/// assert_eq!(rendered, "Property 'x.y' was changed from 1 to 2");
///
/// let scalar = Value::from(3);
/// assert!(diff(&scalar, &after, OutputFormat::Plain).is_err());
/// # Ok::<(), confdiff_core::Error>(())
/// ```
pub fn diff(before: &Value, after: &Value, format: OutputFormat) -> Result<String, Error> {
    diff_with(before, after, format, &DiffOptions::default(), &RenderConfig::default())
}

/// Like [`diff`], with explicit engine and renderer configuration.
pub fn diff_with(
    before: &Value,
    after: &Value,
    format: OutputFormat,
    options: &DiffOptions,
    config: &RenderConfig,
) -> Result<String, Error> {
    let before = root_mapping(before)?;
    let after = root_mapping(after)?;
    let tree = diff::compare(before, after, options);
    Ok(tree.render(format, config)?)
}

/// Parses both documents from text, compares them, and renders the result.
pub fn diff_str(
    before: &str,
    before_format: InputFormat,
    after: &str,
    after_format: InputFormat,
    format: OutputFormat,
) -> Result<String, Error> {
    let before = Mapping::parse(before, before_format)?;
    let after = Mapping::parse(after, after_format)?;
    let tree = diff::compare(&before, &after, &DiffOptions::default());
    Ok(tree.render(format, &RenderConfig::default())?)
}

fn root_mapping(value: &Value) -> Result<&Mapping, ParseError> {
    value.as_mapping().ok_or(ParseError::NotAMapping { found: value.kind() })
}

/// Returns the semantic version of the `confdiff-core` crate.
///
/// ```
/// assert!(!confdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
