//! Normalized entity node types.
//!
//! Three entity kinds come back from the boards API:
//! - [`EntityKind::Office`] — a physical location, may nest other offices
//! - [`EntityKind::Department`] — an organizational unit, may nest other departments
//! - [`EntityKind::Job`] — a posting, linked to departments and offices
//!
//! A [`Node`] is the reference-only output of the normalization pipeline: all
//! relationships are expressed as [`NodeId`] values, never as embedded
//! sub-records. The raw API payload (with its nested sub-collections) is a
//! disjoint representation that the pipeline consumes but never emits.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of entity kinds produced by this source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Office,
    Department,
    Job,
}

impl EntityKind {
    /// Type tag used as the identity seed component and as the node type name
    /// exposed to the downstream store.
    pub fn type_tag(self) -> &'static str {
        match self {
            EntityKind::Office => "Office",
            EntityKind::Department => "Department",
            EntityKind::Job => "Job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

/// Stable, opaque identity of a normalized node.
///
/// Derived deterministically from `(EntityKind, remote id)`; equal inputs
/// always produce equal ids across runs. Serialized as the hyphenated UUID
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A normalized entity node, ready for the downstream graph sink.
///
/// Carries only scalar fields and identity references; nested sub-records
/// from the raw payload are consumed during linking and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity, the join key for every reference.
    pub identity: NodeId,
    /// Entity kind tag.
    pub kind: EntityKind,
    /// Remote id as assigned by the source API. Never `0`.
    pub remote_id: i64,
    /// MD5 content digest over the raw record's canonical serialization,
    /// used by the downstream store for change detection.
    pub fingerprint: String,
    /// Scalar fields copied verbatim from the raw record (nested
    /// sub-collection fields excluded).
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Same-type parent, if the record carried a `parent_id`.
    pub parent: Option<NodeId>,
    /// Same-type children, in source order.
    pub children: Vec<NodeId>,
    /// Cross-referenced office identities (jobs only).
    pub related_office_ids: BTreeSet<NodeId>,
    /// Cross-referenced department identities (offices and jobs).
    pub related_department_ids: BTreeSet<NodeId>,
    /// Cross-referenced job identities (offices and departments).
    pub related_job_ids: BTreeSet<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_node() -> Node {
        Node {
            identity: NodeId(Uuid::new_v4()),
            kind: EntityKind::Office,
            remote_id: 42,
            fingerprint: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            fields: json!({"id": 42, "name": "Berlin"})
                .as_object()
                .cloned()
                .unwrap(),
            parent: None,
            children: vec![],
            related_office_ids: BTreeSet::new(),
            related_department_ids: BTreeSet::new(),
            related_job_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_entity_kind_type_tags() {
        assert_eq!(EntityKind::Office.type_tag(), "Office");
        assert_eq!(EntityKind::Department.type_tag(), "Department");
        assert_eq!(EntityKind::Job.type_tag(), "Job");
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let id = NodeId(Uuid::nil());
        let serialized = serde_json::to_value(id).expect("serialization failed");
        assert_eq!(serialized, json!("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_node_serde_roundtrip() {
        let mut node = sample_node();
        node.children.push(NodeId(Uuid::new_v4()));
        node.related_department_ids.insert(NodeId(Uuid::new_v4()));

        let serialized = serde_json::to_string(&node).expect("serialization failed");
        let deserialized: Node =
            serde_json::from_str(&serialized).expect("deserialization failed");

        assert_eq!(deserialized, node);
    }

    #[test]
    fn test_related_sets_deduplicate() {
        let mut node = sample_node();
        let dup = NodeId(Uuid::nil());
        node.related_job_ids.insert(dup);
        node.related_job_ids.insert(dup);
        assert_eq!(node.related_job_ids.len(), 1);
    }
}
