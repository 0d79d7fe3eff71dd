use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{Diff, DiffOptions, Number, ParseError};

/// A parsed configuration value.
///
/// Mappings are the only values the diff engine descends into. Lists are kept
/// as opaque values: they take part in equality checks but are never diffed
/// element by element.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `null` (JSON) or `~` (YAML).
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar represented as IEEE-754 double precision.
    Number(Number),
    /// String scalar.
    String(String),
    /// Sequence of values.
    List(Vec<Value>),
    /// Nested mapping.
    Map(Mapping),
}

impl Value {
    /// Parses a JSON string into a [`Value`].
    ///
    /// ```
    /// # use confdiff_core::Value;
    /// let value = Value::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(value.is_mapping());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, ParseError> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into a [`Value`].
    ///
    /// ```
    /// # use confdiff_core::Value;
    /// let value = Value::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(value.is_mapping());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, ParseError> {
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value into a [`Value`], keeping object key order.
    pub fn from_json_value(value: JsonValue) -> Result<Self, ParseError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let Some(as_f64) = num.as_f64() else {
                    return Err(ParseError::NumberOutOfRange { value: num.to_string() });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::List(items))
            }
            JsonValue::Object(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    mapping.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Map(mapping))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, ParseError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                let Some(as_f64) = num.as_f64() else {
                    return Err(ParseError::NumberOutOfRange { value: num.to_string() });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::List(items))
            }
            YamlValue::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    mapping.insert(yaml_key(key)?, Self::from_yaml_value(value)?);
                }
                Ok(Self::Map(mapping))
            }
            YamlValue::Tagged(tagged) => {
                Err(ParseError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Converts the value into a serde JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Number(n) => JsonValue::Number(n.to_json_number()),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::List(values) => {
                JsonValue::Array(values.iter().map(Self::to_json_value).collect())
            }
            Self::Map(mapping) => {
                let mut object = serde_json::Map::new();
                for (key, value) in mapping.iter() {
                    object.insert(key.to_owned(), value.to_json_value());
                }
                JsonValue::Object(object)
            }
        }
    }

    /// Returns the nested mapping when this value is one.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Map(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Indicates whether the value is a mapping.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Unwraps a document root, failing when it is not a mapping.
    ///
    /// ```
    /// # use confdiff_core::{ParseError, Value};
    /// let err = Value::from_json_str("[1, 2]")?.into_mapping().unwrap_err();
    /// assert!(matches!(err, ParseError::NotAMapping { found: "list" }));
    /// # Ok::<(), ParseError>(())
    /// ```
    pub fn into_mapping(self) -> Result<Mapping, ParseError> {
        match self {
            Self::Map(mapping) => Ok(mapping),
            other => Err(ParseError::NotAMapping { found: other.kind() }),
        }
    }

    /// Short human-readable name of the value's type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }
}

fn yaml_key(key: YamlValue) -> Result<String, ParseError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_owned()),
        other => Err(ParseError::NonScalarYamlKey { found: format!("{other:?}") }),
    }
}

/// Natural textual form: strings unquoted, containers as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Map(_) => {
                let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Number(n) => n.to_json_number().serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(values) => serializer.collect_seq(values),
            Self::Map(mapping) => mapping.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

/// A string-keyed mapping that remembers the order in which keys were first
/// inserted.
///
/// Iteration follows insertion order. Equality ignores order, so two
/// documents listing the same keys in a different order compare equal.
///
/// ```
/// # use confdiff_core::{Mapping, Value};
/// let mut mapping = Mapping::new();
/// mapping.insert("b", Value::from(1));
/// mapping.insert("a", Value::from(2));
/// assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(mapping.get("a"), Some(&Value::from(2)));
/// ```
// `IndexMap` equality compares entries regardless of their position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indicates whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Indicates whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value, returning the previous one. Replacing an existing key
    /// keeps its original position.
    pub fn insert<K>(&mut self, key: K, value: Value) -> Option<Value>
    where
        K: Into<String>,
    {
        self.entries.insert(key.into(), value)
    }

    /// Removes `key`, returning its value if it was present. The remaining
    /// keys keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Computes the structural diff between two mappings.
    ///
    /// ```
    /// # use confdiff_core::{DiffOptions, Value};
    /// let before = Value::from_json_str("{\"a\":1,\"b\":2}")?.into_mapping()?;
    /// let after = Value::from_json_str("{\"a\":1,\"b\":3}")?.into_mapping()?;
    /// let diff = before.diff(&after, &DiffOptions::default());
    /// assert_eq!(diff.len(), 2);
    /// assert!(diff.has_changes());
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn diff(&self, other: &Self, options: &DiffOptions) -> Diff {
        crate::diff::compare(self, other, options)
    }
}

impl<K> FromIterator<(K, Value)> for Mapping
where
    K: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)?.into_mapping().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{
        collection::{btree_map, vec},
        prelude::*,
        string::string_regex,
    };

    fn arb_json_value() -> impl Strategy<Value = JsonValue> {
        let leaf = prop_oneof![
            Just(JsonValue::Null),
            any::<bool>().prop_map(JsonValue::Bool),
            proptest::num::f64::ANY.prop_filter_map("finite", |f| {
                if f.is_finite() {
                    serde_json::Number::from_f64(f).map(JsonValue::Number)
                } else {
                    None
                }
            }),
            string_regex("[a-zA-Z0-9]{0,8}").unwrap().prop_map(JsonValue::String),
        ];
        leaf.prop_recursive(4, 8, 4, move |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
                btree_map(string_regex("[a-zA-Z0-9]{1,8}").unwrap(), inner, 0..4).prop_map(|map| {
                    let mut object = serde_json::Map::new();
                    for (k, v) in map {
                        object.insert(k, v);
                    }
                    JsonValue::Object(object)
                }),
            ]
        })
    }

    #[test]
    fn json_object_keeps_document_order() {
        let value = Value::from_json_str("{\"zeta\":1,\"alpha\":2,\"mid\":3}").unwrap();
        let mapping = value.into_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn yaml_mapping_keeps_document_order() {
        let value = Value::from_yaml_str("host: localhost\nport: 8080\nenabled: true\n").unwrap();
        let mapping = value.into_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["host", "port", "enabled"]);
        assert_eq!(mapping.get("port"), Some(&Value::from(8080)));
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let value = Value::from_yaml_str("1: one\ntrue: yes\n").unwrap();
        let mapping = value.into_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["1", "true"]);
    }

    #[test]
    fn yaml_sequence_key_errors() {
        let err = Value::from_yaml_str("? [1, 2]\n: 3\n").unwrap_err();
        let ParseError::NonScalarYamlKey { .. } = err else {
            panic!("expected NonScalarYamlKey error, got {err:?}");
        };
    }

    #[test]
    fn yaml_tag_errors() {
        let err = Value::from_yaml_str("value: !custom 1\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedYamlTag { .. }), "got {err:?}");
    }

    #[test]
    fn yaml_infinity_is_rejected() {
        let err = Value::from_yaml_str("limit: .inf\n").unwrap_err();
        assert!(matches!(err, ParseError::NotFinite { .. }), "got {err:?}");
    }

    #[test]
    fn scalar_root_is_not_a_mapping() {
        let err = Value::from_json_str("42").unwrap().into_mapping().unwrap_err();
        assert!(matches!(err, ParseError::NotAMapping { found: "number" }));
    }

    #[test]
    fn mapping_equality_ignores_order() {
        let lhs = Value::from_json_str("{\"a\":1,\"b\":{\"c\":true}}").unwrap();
        let rhs = Value::from_json_str("{\"b\":{\"c\":true},\"a\":1}").unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut mapping: Mapping =
            [("a", Value::from(1)), ("b", Value::from(2))].into_iter().collect();
        let previous = mapping.insert("a", Value::from(3));
        assert_eq!(previous, Some(Value::from(1)));
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn remove_drops_key_from_order() {
        let mut mapping: Mapping =
            [("a", Value::from(1)), ("b", Value::from(2))].into_iter().collect();
        assert_eq!(mapping.remove("a"), Some(Value::from(1)));
        assert_eq!(mapping.remove("a"), None);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn remove_keeps_remaining_keys_in_order() {
        let mut mapping: Mapping =
            [("c", Value::from(1)), ("a", Value::from(2)), ("b", Value::from(3))]
                .into_iter()
                .collect();
        mapping.remove("c");
        mapping.insert("c", Value::from(4));
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        mapping.remove("a");
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn display_uses_natural_form() {
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(false).to_string(), "false");
        let list = Value::from_json_str("[1,\"two\",null]").unwrap();
        assert_eq!(list.to_string(), "[1,\"two\",null]");
    }

    proptest! {
        #[test]
        fn json_roundtrips_through_value(value in arb_json_value()) {
            let parsed = Value::from_json_value(value.clone()).unwrap();
            let reconstructed = parsed.to_json_value();
            let parsed_again = Value::from_json_value(reconstructed.clone()).unwrap();
            prop_assert_eq!(parsed_again.clone(), parsed);
            prop_assert_eq!(parsed_again.to_json_value(), reconstructed);
        }

        #[test]
        fn serde_roundtrip_preserves_value(value in arb_json_value()) {
            let parsed = Value::from_json_value(value).unwrap();
            let text = serde_json::to_string(&parsed).unwrap();
            let decoded: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(decoded, parsed);
        }
    }
}
