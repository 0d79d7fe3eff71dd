//! Input format detection and document loading.
//!
//! The diff engine only ever sees [`Mapping`] values; this module is the
//! boundary that turns raw JSON or YAML text into one.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{FormatError, Mapping, ParseError, Value};

/// Serialization formats accepted as diff inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON documents (`.json`).
    Json,
    /// YAML documents (`.yml`, `.yaml`).
    Yaml,
}

impl InputFormat {
    /// Picks the parser for a file based on its extension.
    ///
    /// ```
    /// # use confdiff_core::InputFormat;
    /// assert_eq!(InputFormat::from_path("config/app.yml")?, InputFormat::Yaml);
    /// assert_eq!(InputFormat::from_path("settings.JSON")?, InputFormat::Json);
    /// assert!(InputFormat::from_path("notes.txt").is_err());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    pub fn from_path<P>(path: P) -> Result<Self, ParseError>
    where
        P: AsRef<Path>,
    {
        let extension = path.as_ref().extension().and_then(|ext| ext.to_str());
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            _ => Err(ParseError::UnsupportedExtension { extension: extension.map(str::to_owned) }),
        }
    }
}

impl FromStr for InputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(FormatError::UnknownInput(s.to_owned())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

impl Mapping {
    /// Parses a configuration document whose root must be a mapping.
    ///
    /// Blank input yields an empty mapping, and so does a YAML stream holding
    /// no document content (only comments, a bare `---`, or `~`).
    ///
    /// ```
    /// # use confdiff_core::{InputFormat, Mapping};
    /// let doc = Mapping::parse("name: api\nreplicas: 3\n", InputFormat::Yaml)?;
    /// assert_eq!(doc.len(), 2);
    /// assert!(Mapping::parse("  \n", InputFormat::Json)?.is_empty());
    /// assert!(Mapping::parse("# nothing yet\n", InputFormat::Yaml)?.is_empty());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    pub fn parse(input: &str, format: InputFormat) -> Result<Self, ParseError> {
        tracing::debug!(%format, bytes = input.len(), "parsing document");
        if input.trim().is_empty() {
            return Ok(Self::new());
        }
        let value = match format {
            InputFormat::Json => Value::from_json_str(input)?,
            InputFormat::Yaml => match Value::from_yaml_str(input)? {
                Value::Null => return Ok(Self::new()),
                value => value,
            },
        };
        value.into_mapping()
    }
}
