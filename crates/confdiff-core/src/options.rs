use std::fmt;

use serde::{Deserialize, Serialize};

/// Controls the order in which keys of one mapping level appear in a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyOrder {
    /// Keys of the before-document in their original order, followed by keys
    /// that only exist in the after-document, in their order (default).
    #[default]
    FirstSeen,
    /// Keys sorted lexicographically.
    Sorted,
}

/// Configuration knobs passed to the diff engine.
///
/// ```
/// # use confdiff_core::{DiffOptions, KeyOrder};
/// let opts = DiffOptions::default().with_key_order(KeyOrder::Sorted);
/// assert_eq!(opts.key_order(), KeyOrder::Sorted);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiffOptions {
    key_order: KeyOrder,
}

impl DiffOptions {
    /// Returns the configured key ordering.
    #[must_use]
    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    /// Sets the key ordering.
    #[must_use]
    pub fn with_key_order(mut self, order: KeyOrder) -> Self {
        self.key_order = order;
        self
    }
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrder::FirstSeen => f.write_str("first-seen"),
            KeyOrder::Sorted => f.write_str("sorted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_first_seen() {
        assert_eq!(DiffOptions::default().key_order(), KeyOrder::FirstSeen);
    }

    #[test]
    fn key_order_display_names() {
        assert_eq!(KeyOrder::FirstSeen.to_string(), "first-seen");
        assert_eq!(KeyOrder::Sorted.to_string(), "sorted");
    }
}
