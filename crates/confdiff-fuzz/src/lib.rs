//! Fuzzing harnesses for the `confdiff` engine.
//!
//! Each public function accepts raw bytes so it can be driven from
//! `cargo fuzz` targets as well as from ordinary unit tests. Recoverable
//! errors are swallowed; broken invariants panic so the fuzzer records them.
//!
//! # Examples
//!
//! Run the parsing harness on a YAML snippet:
//!
//! ```
//! confdiff_fuzz::fuzz_parse(b"a: 1\nb: [x, y]\n");
//! ```
//!
//! Invoke the diff harness on deterministic input:
//!
//! ```
//! confdiff_fuzz::fuzz_diff(&[1, 2, 3, 4]);
//! ```
//!
//! Exercise the apply harness with arbitrary bytes:
//!
//! ```
//! confdiff_fuzz::fuzz_apply(b"example");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use confdiff_core::{
    Diff, DiffOptions, InputFormat, KeyOrder, Mapping, OutputFormat, RenderConfig, Value,
};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_LIST_LEN: u8 = 6;
const MAX_MAPPING_LEN: u8 = 6;
const MAX_KEY_LEN: u8 = 3;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON and YAML document loaders.
///
/// ```
/// confdiff_fuzz::fuzz_parse(b"{\"key\":\"value\"}");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Mapping::parse(text, InputFormat::Json);
        let _ = Mapping::parse(text, InputFormat::Yaml);
    }
}

/// Diffs two randomly generated documents and checks the result.
///
/// The diff must render in every output format, must turn `before` into
/// `after` when applied, and its reverse must turn `after` back into
/// `before`.
///
/// ```
/// confdiff_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(before) = random_mapping(&mut unstructured) else {
        return;
    };
    let Some(after) = random_mapping(&mut unstructured) else {
        return;
    };
    let order = if unstructured.arbitrary().unwrap_or(false) {
        KeyOrder::Sorted
    } else {
        KeyOrder::FirstSeen
    };
    let diff = before.diff(&after, &DiffOptions::default().with_key_order(order));

    assert_eq!(diff.has_changes(), before != after, "change detection disagrees with equality");

    let config = RenderConfig::default();
    for format in OutputFormat::ALL {
        assert!(diff.render(format, &config).is_ok(), "rendering {format} failed");
    }

    let patched = diff.apply(&before).unwrap_or_else(|err| panic!("forward apply failed: {err}"));
    assert_eq!(patched, after, "forward apply did not reproduce the target");
    let restored =
        diff.reverse().apply(&after).unwrap_or_else(|err| panic!("reverse apply failed: {err}"));
    assert_eq!(restored, before, "reverse apply did not reproduce the source");
}

/// Applies both valid and arbitrary diffs to randomly generated documents.
///
/// The harness first computes a legitimate diff and applies it in both
/// directions. It then attempts to decode an arbitrary diff from the raw
/// bytes and applies it to another random document to exercise error paths.
///
/// ```
/// confdiff_fuzz::fuzz_apply(b"patch fuzz");
/// ```
pub fn fuzz_apply(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    if let (Some(base), Some(target)) =
        (random_mapping(&mut unstructured), random_mapping(&mut unstructured))
    {
        let diff = base.diff(&target, &DiffOptions::default());
        let _ = diff.apply(&base);
        let _ = diff.reverse().apply(&target);
    }

    if let Ok(diff) = serde_json::from_slice::<Diff>(data) {
        let mut unstructured = Unstructured::new(data);
        if let Some(seed) = random_mapping(&mut unstructured) {
            let _ = diff.apply(&seed);
        }
        let _ = diff.render(OutputFormat::Tree, &RenderConfig::default());
    }
}

fn random_mapping(unstructured: &mut Unstructured<'_>) -> Option<Mapping> {
    let object = json_object(unstructured, 0).ok()?;
    Value::from_json_value(object).ok()?.into_mapping().ok()
}

fn json_value(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    match unstructured.int_in_range::<u8>(0..=5)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured, MAX_STRING_LEN)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_LIST_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => json_object(unstructured, depth),
    }
}

// Short keys make collisions between the two documents likely.
fn json_object(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_MAPPING_LEN)?);
    let mut map = JsonMap::new();
    for _ in 0..len {
        let key = random_string(unstructured, MAX_KEY_LEN)?;
        let value = json_value(unstructured, depth + 1)?;
        map.insert(key, value);
    }
    Ok(JsonValue::Object(map))
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured, MAX_STRING_LEN)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        let int = unstructured.arbitrary::<i32>()?;
        Ok(JsonNumber::from(int))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(
    unstructured: &mut Unstructured<'_>,
    max_len: u8,
) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=max_len)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}
