use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a diff node: the keys leading from the document root down to
/// and including the node's own key.
///
/// Displays as the dot-joined key sequence.
///
/// ```
/// # use confdiff_core::diff::Path;
/// let path = Path::new().with_key("server").with_key("port");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "server.port");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key, returning the extended path.
    #[must_use]
    pub fn with_key<S>(mut self, key: S) -> Self
    where
        S: Into<String>,
    {
        self.0.push(key.into());
        self
    }

    /// Returns the underlying keys.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pushes a new key in-place.
    pub fn push<S>(&mut self, key: S)
    where
        S: Into<String>,
    {
        self.0.push(key.into());
    }

    /// Pops the last key off the path.
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }
}

impl From<Vec<String>> for Path {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_displays_as_empty_string() {
        assert_eq!(Path::new().to_string(), "");
    }

    #[test]
    fn push_and_pop_are_symmetric() {
        let mut path = Path::new().with_key("a");
        path.push("b");
        assert_eq!(path.to_string(), "a.b");
        assert_eq!(path.pop().as_deref(), Some("b"));
        assert_eq!(path.to_string(), "a");
    }

    #[test]
    fn serde_round_trip_for_keys() {
        let path = Path::from(vec!["group1".to_owned(), "nest".to_owned()]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "[\"group1\",\"nest\"]");
        let decoded: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, path);
    }
}
