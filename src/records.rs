//! Typed views over raw API records.
//!
//! The boards API returns loosely-typed JSON objects. The pipeline keeps them
//! as [`serde_json::Value`] so unknown scalar fields pass through verbatim,
//! and reads the relational parts (hierarchy ids, nested sub-collections)
//! through the small typed views defined here. Views are extracted by value,
//! never by mutating the raw record.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Result, SourceError};

/// Keys under which the API embeds nested sub-collections.
///
/// These fields are consumed during linking and excluded from emitted nodes.
pub const NESTED_COLLECTION_KEYS: [&str; 3] = ["departments", "jobs", "offices"];

/// Same-type hierarchy fields carried by office and department records.
#[derive(Debug, Default)]
pub struct HierarchyFields {
    pub parent_id: Option<i64>,
    pub child_ids: Vec<i64>,
}

impl HierarchyFields {
    /// Read the hierarchy fields off a raw record.
    ///
    /// Fields of the wrong shape mean the record is structurally broken and
    /// surface as [`SourceError::InconsistentRecord`].
    pub fn from_record(record: &Value) -> Result<Self> {
        let object = record.as_object().ok_or_else(|| {
            SourceError::InconsistentRecord("record is not a JSON object".to_string())
        })?;

        let mut fields = HierarchyFields::default();
        match object.get("parent_id") {
            None | Some(Value::Null) => {}
            Some(value) => {
                fields.parent_id = Some(value.as_i64().ok_or_else(|| {
                    SourceError::InconsistentRecord(format!(
                        "parent_id is not an integer: {value}"
                    ))
                })?);
            }
        }
        match object.get("child_ids") {
            None | Some(Value::Null) => {}
            Some(value) => {
                fields.child_ids = serde_json::from_value(value.clone()).map_err(|e| {
                    SourceError::InconsistentRecord(format!(
                        "child_ids is not a list of integers: {e}"
                    ))
                })?;
            }
        }
        Ok(fields)
    }
}

/// Identity-only stub of a nested record, as embedded under another entity.
#[derive(Debug, Deserialize)]
pub struct NestedStub {
    pub id: i64,
}

/// A department embedded inside an office record, possibly carrying its own
/// nested job stubs.
#[derive(Debug, Deserialize)]
pub struct NestedDepartment {
    pub id: i64,
    #[serde(default)]
    pub jobs: Vec<NestedStub>,
}

/// Extract a nested sub-collection field as a typed list.
///
/// Returns an empty list when the field is absent or null. A present
/// non-array value is [`SourceError::MalformedNestedPayload`]; an array whose
/// elements do not carry a numeric id is [`SourceError::InconsistentRecord`],
/// since the filter stage removes id-less records before linking runs.
pub fn nested_collection<T>(record: &Value, key: &str) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let Some(value) = record.get(key) else {
        return Ok(Vec::new());
    };
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| {
                    SourceError::InconsistentRecord(format!(
                        "nested record under `{key}` has no valid id: {e}"
                    ))
                })
            })
            .collect(),
        other => Err(SourceError::MalformedNestedPayload(format!(
            "field `{key}` is not an array: {other}"
        ))),
    }
}
