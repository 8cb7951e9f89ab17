//! Node construction.
//!
//! Turns one filtered raw record into a [`Node`]: resolves its identity,
//! computes the content fingerprint, and copies scalar fields verbatim.
//! Relational linking happens in the later stages; this stage never reads
//! `parent_id`, `child_ids`, or the nested sub-collections beyond excluding
//! the latter from the emitted field set.

use md5::{Digest, Md5};
use serde_json::Value;

use crate::errors::{Result, SourceError};
use crate::nodes::{EntityKind, Node};
use crate::records::NESTED_COLLECTION_KEYS;

use super::identity;

/// Build a normalized node from a filtered raw record.
///
/// Does not mutate the input; the linking stages still read relational
/// fields off the original payload afterwards.
pub fn build_node(record: &Value, kind: EntityKind) -> Result<Node> {
    let object = record.as_object().ok_or_else(|| {
        SourceError::InconsistentRecord(format!("{kind} record is not a JSON object"))
    })?;

    let node_id = identity::resolve_raw(kind, object.get("id"))?;
    // resolve_raw established that id is a non-zero integer.
    let remote_id = object["id"].as_i64().unwrap_or_default();

    let mut fields = serde_json::Map::with_capacity(object.len());
    for (key, value) in object {
        if NESTED_COLLECTION_KEYS.contains(&key.as_str()) {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }

    Ok(Node {
        identity: node_id,
        kind,
        remote_id,
        fingerprint: fingerprint(record),
        fields,
        parent: None,
        children: Vec::new(),
        related_office_ids: Default::default(),
        related_department_ids: Default::default(),
        related_job_ids: Default::default(),
    })
}

/// MD5 hex digest over the record's canonical serialization.
///
/// `serde_json` keeps object keys sorted (BTreeMap-backed maps), so two
/// records with the same fields in different source order hash identically.
pub fn fingerprint(record: &Value) -> String {
    let mut hasher = Md5::new();
    hasher.update(record.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
