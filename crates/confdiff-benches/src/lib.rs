//! Benchmark corpora for the `confdiff` engine.
//!
//! Every corpus is generated deterministically in memory, serialized to
//! text, and parsed back through [`Mapping::parse`] so that loading a
//! dataset exercises the same path the command-line tool takes.
//!
//! # Examples
//!
//! ```
//! use confdiff_benches::available_corpora;
//! use confdiff_core::DiffOptions;
//!
//! let corpus = &available_corpora()[0];
//! let dataset = corpus.load()?;
//! assert!(dataset.diff(&DiffOptions::default()).has_changes());
//! # Ok::<(), confdiff_core::ParseError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use confdiff_core::{Diff, DiffOptions, InputFormat, Mapping, ParseError};
use serde_json::{json, Map as JsonMap, Value as JsonValue};

const FLAT_KEYS: usize = 500;
const SERVICES: usize = 40;
const TREE_DEPTH: u32 = 6;
const TREE_BRANCHING: usize = 3;

/// A named pair of documents to benchmark against.
#[derive(Debug)]
pub struct Corpus {
    name: &'static str,
    format: InputFormat,
    generate: fn() -> (JsonValue, JsonValue),
}

impl Corpus {
    /// Short identifier used as the benchmark parameter.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Format the documents are parsed as.
    #[must_use]
    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// Generates both documents and parses them.
    ///
    /// YAML corpora are emitted as indented JSON, a subset YAML parsers accept.
    pub fn load(&self) -> Result<Dataset, ParseError> {
        let (before, after) = (self.generate)();
        let before = self.serialize(&before);
        let after = self.serialize(&after);
        Ok(Dataset {
            input_bytes: before.len() + after.len(),
            before: Mapping::parse(&before, self.format)?,
            after: Mapping::parse(&after, self.format)?,
        })
    }

    fn serialize(&self, value: &JsonValue) -> String {
        match self.format {
            InputFormat::Json => value.to_string(),
            // Indented JSON keeps a space after every colon, which YAML requires.
            InputFormat::Yaml => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// Parsed documents of a [`Corpus`].
#[derive(Debug, Clone)]
pub struct Dataset {
    before: Mapping,
    after: Mapping,
    input_bytes: usize,
}

impl Dataset {
    /// The original document.
    #[must_use]
    pub fn before(&self) -> &Mapping {
        &self.before
    }

    /// The updated document.
    #[must_use]
    pub fn after(&self) -> &Mapping {
        &self.after
    }

    /// Combined size of both serialized documents.
    #[must_use]
    pub fn input_bytes(&self) -> usize {
        self.input_bytes
    }

    /// Computes the diff from `before` to `after`.
    #[must_use]
    pub fn diff(&self, options: &DiffOptions) -> Diff {
        self.before.diff(&self.after, options)
    }
}

static CORPORA: [Corpus; 3] = [
    Corpus { name: "flat-settings", format: InputFormat::Json, generate: flat_settings },
    Corpus { name: "service-manifest", format: InputFormat::Yaml, generate: service_manifest },
    Corpus { name: "deep-tree", format: InputFormat::Json, generate: deep_tree },
];

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

fn flat_settings() -> (JsonValue, JsonValue) {
    let mut before = JsonMap::new();
    let mut after = JsonMap::new();
    for i in 0..FLAT_KEYS {
        let key = format!("setting_{i:04}");
        before.insert(key.clone(), json!(i));
        if i % 11 == 0 {
            continue;
        }
        let value = if i % 7 == 0 { json!(format!("value-{i}")) } else { json!(i) };
        after.insert(key, value);
    }
    for i in 0..FLAT_KEYS / 20 {
        after.insert(format!("extra_{i:03}"), json!(i % 2 == 0));
    }
    (JsonValue::Object(before), JsonValue::Object(after))
}

fn service_manifest() -> (JsonValue, JsonValue) {
    let mut before = JsonMap::new();
    let mut after = JsonMap::new();
    for i in 0..SERVICES {
        let name = format!("service-{i:02}");
        before.insert(name.clone(), service(i, false));
        if i % 9 != 8 {
            after.insert(name, service(i, true));
        }
    }
    after.insert("ingress".to_owned(), json!({"host": "example.test", "tls": true}));
    (json!({"version": 2, "services": before}), json!({"version": 3, "services": after}))
}

fn service(index: usize, updated: bool) -> JsonValue {
    let mut env = JsonMap::new();
    for j in 0..8 {
        env.insert(format!("VAR_{j}"), json!(format!("value-{index}-{j}")));
    }
    if updated && index % 4 == 0 {
        env.insert("FEATURE_FLAG".to_owned(), json!("on"));
    }
    let replicas = if updated && index % 3 == 0 { index + 2 } else { index + 1 };
    let mut service = json!({
        "image": format!("registry.test/app-{index}:1.0"),
        "replicas": replicas,
        "env": env,
        "ports": [8000 + index, 9000 + index],
    });
    if !(updated && index % 5 == 0) {
        service["limits"] = json!({"cpu": "500m", "memory": format!("{}Mi", 128 * (index + 1))});
    }
    service
}

fn deep_tree() -> (JsonValue, JsonValue) {
    let mut counter = 0;
    let before = tree_level(TREE_DEPTH, &mut counter, false);
    let mut counter = 0;
    let after = tree_level(TREE_DEPTH, &mut counter, true);
    (before, after)
}

fn tree_level(depth: u32, counter: &mut usize, updated: bool) -> JsonValue {
    let mut map = JsonMap::new();
    for branch in 0..TREE_BRANCHING {
        let key = format!("n{branch}");
        if depth == 0 {
            *counter += 1;
            let leaf = if updated && *counter % 13 == 0 { *counter * 10 } else { *counter };
            map.insert(key, json!(leaf));
        } else {
            map.insert(key, tree_level(depth - 1, counter, updated));
        }
    }
    JsonValue::Object(map)
}
