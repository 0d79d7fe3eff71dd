//! Renderers turning a [`Diff`] into text.
//!
//! Every renderer is a pure function of the diff tree. The three formats
//! share no state and never call each other.

mod json;
mod plain;
mod tree;

use std::fmt;
use std::str::FromStr;

use crate::{Diff, FormatError, OptionsError};

/// Output formats understood by [`Diff::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// One sentence per changed property.
    Plain,
    /// Brace-delimited tree with `+`/`-` markers (default).
    #[default]
    Tree,
    /// Machine-readable JSON serialization of the diff tree.
    Json,
}

impl OutputFormat {
    /// All formats, in the order they are listed to users.
    pub const ALL: [OutputFormat; 3] = [Self::Tree, Self::Plain, Self::Json];
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    /// Parses a format identifier. `stylish` is accepted as an alias for
    /// `tree`.
    ///
    /// ```
    /// # use confdiff_core::{FormatError, OutputFormat};
    /// assert_eq!("plain".parse::<OutputFormat>()?, OutputFormat::Plain);
    /// assert_eq!("Stylish".parse::<OutputFormat>()?, OutputFormat::Tree);
    /// assert!("xml".parse::<OutputFormat>().is_err());
    /// # Ok::<(), FormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "tree" | "stylish" => Ok(Self::Tree),
            "json" => Ok(Self::Json),
            _ => Err(FormatError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Tree => f.write_str("tree"),
            Self::Json => f.write_str("json"),
        }
    }
}

const DEFAULT_INDENT: usize = 4;
const MIN_INDENT: usize = 2;

/// Configuration toggles for diff rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    indent: usize,
    pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT, pretty: false }
    }
}

impl RenderConfig {
    /// Constructs a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level used by the tree renderer.
    ///
    /// The last two columns of each indent hold the state marker, so widths
    /// below two are rejected.
    ///
    /// ```
    /// # use confdiff_core::{OptionsError, RenderConfig};
    /// let config = RenderConfig::new().with_indent(2)?;
    /// assert_eq!(config.indent(), 2);
    /// assert_eq!(RenderConfig::new().with_indent(1), Err(OptionsError::IndentTooNarrow(1)));
    /// # Ok::<(), OptionsError>(())
    /// ```
    pub fn with_indent(mut self, indent: usize) -> Result<Self, OptionsError> {
        if indent < MIN_INDENT {
            return Err(OptionsError::IndentTooNarrow(indent));
        }
        self.indent = indent;
        Ok(self)
    }

    /// Enables or disables pretty-printed JSON output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Spaces per nesting level in tree output.
    #[must_use]
    pub fn indent(self) -> usize {
        self.indent
    }

    /// Indicates whether JSON output is pretty-printed.
    #[must_use]
    pub fn pretty(self) -> bool {
        self.pretty
    }
}

/// Errors that can occur while rendering or decoding diffs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    message: String,
}

impl RenderError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl Diff {
    /// Renders the diff in the requested format.
    ///
    /// ```
    /// # use confdiff_core::{DiffOptions, OutputFormat, RenderConfig, Value};
    /// let before = Value::from_json_str("{\"a\":1}")?.into_mapping()?;
    /// let after = Value::from_json_str("{\"a\":2}")?.into_mapping()?;
    /// let diff = before.diff(&after, &DiffOptions::default());
    /// let rendered = diff.render(OutputFormat::Plain, &RenderConfig::default())?;
    /// assert_eq!(rendered, "Property 'a' was changed from 1 to 2");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn render(
        &self,
        format: OutputFormat,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        tracing::debug!(%format, nodes = self.len(), "rendering diff");
        match format {
            OutputFormat::Plain => Ok(self.render_plain()),
            OutputFormat::Tree => Ok(self.render_tree(config)),
            OutputFormat::Json => self.render_json(config),
        }
    }

    /// Renders one `Property '...'` sentence per added, deleted, or changed
    /// property, joined by newlines.
    ///
    /// ```
    /// # use confdiff_core::{Diff, DiffNode, Value};
    /// let diff = Diff::from_nodes(vec![
    ///     DiffNode::unchanged("a", Value::from(1)),
    ///     DiffNode::added("c", Value::from("on")),
    /// ]);
    /// assert_eq!(diff.render_plain(), "Property 'c' was added with value: 'on'");
    /// ```
    #[must_use]
    pub fn render_plain(&self) -> String {
        plain::render(self)
    }

    /// Renders the brace-delimited tree, including unchanged keys.
    ///
    /// ```
    /// # use confdiff_core::{Diff, DiffNode, RenderConfig, Value};
    /// let diff = Diff::from_nodes(vec![
    ///     DiffNode::unchanged("a", Value::from(1)),
    ///     DiffNode::changed("b", Value::from(2), Value::from(3)),
    /// ]);
    /// assert_eq!(
    ///     diff.render_tree(&RenderConfig::default()),
    ///     "{\n    a: 1\n  - b: 2\n  + b: 3\n}"
    /// );
    /// ```
    #[must_use]
    pub fn render_tree(&self, config: &RenderConfig) -> String {
        tree::render(self, config)
    }

    /// Serializes the diff tree as JSON.
    ///
    /// ```
    /// # use confdiff_core::{Diff, DiffNode, RenderConfig, Value};
    /// let diff = Diff::from_nodes(vec![DiffNode::deleted("a", Value::Null)]);
    /// let json = diff.render_json(&RenderConfig::default())?;
    /// assert_eq!(json, "[{\"state\":\"deleted\",\"key\":\"a\",\"value\":null}]");
    /// # Ok::<(), confdiff_core::RenderError>(())
    /// ```
    pub fn render_json(&self, config: &RenderConfig) -> Result<String, RenderError> {
        json::render(self, config)
    }

    /// Decodes the output of [`Diff::render_json`] back into a diff.
    ///
    /// ```
    /// # use confdiff_core::{Diff, DiffNode, RenderConfig, Value};
    /// let diff = Diff::from_nodes(vec![DiffNode::added("k", Value::from(true))]);
    /// let json = diff.render_json(&RenderConfig::default())?;
    /// assert_eq!(Diff::from_json_str(&json)?, diff);
    /// # Ok::<(), confdiff_core::RenderError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Diff, RenderError> {
        json::parse(input)
    }
}
