//! Sentinel filtering.
//!
//! The boards API returns placeholder "No Office" / "No Department" records
//! with an id of `0`, and embeds them inside nested sub-collections as well.
//! This stage strips them recursively, bottom-up, before any node is built.

use serde_json::Value;

use crate::errors::Result;
use crate::records::NESTED_COLLECTION_KEYS;

/// Filter a raw collection, removing sentinel records at every nesting depth.
///
/// Pure: returns a new collection, the input is never mutated. Surviving
/// record order is preserved, and filtering twice yields the same result.
/// Nested sub-collections are filtered even on records that are themselves
/// dropped, so a sentinel parent never shields nested sentinels from removal.
pub fn filter_records(records: &[Value]) -> Result<Vec<Value>> {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let record = filter_nested(record)?;
        if has_identity(&record) {
            kept.push(record);
        }
    }
    Ok(kept)
}

/// Recursively filter every nested sub-collection carried by one record.
fn filter_nested(record: &Value) -> Result<Value> {
    let Some(object) = record.as_object() else {
        return Ok(record.clone());
    };
    let mut filtered = object.clone();
    for key in NESTED_COLLECTION_KEYS {
        if let Some(Value::Array(items)) = object.get(key) {
            filtered.insert(key.to_string(), Value::Array(filter_records(items)?));
        }
    }
    Ok(Value::Object(filtered))
}

/// A record survives iff its `id` field is present and truthy: a non-zero
/// number, a non-empty string, or `true`. `0` is the sentinel.
fn has_identity(record: &Value) -> bool {
    match record.get("id") {
        Some(Value::Number(n)) => {
            n.as_i64() != Some(0) && n.as_u64() != Some(0) && n.as_f64() != Some(0.0)
        }
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}
