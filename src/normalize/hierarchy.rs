//! Same-type hierarchy linking.
//!
//! Offices nest within offices and departments within departments; the API
//! expresses this with `parent_id` / `child_ids` raw ids on the record. This
//! stage resolves those ids to identities with the node's own kind. No check
//! is made that the referenced identities exist among the emitted nodes:
//! dangling references are the downstream store's concern.

use serde_json::Value;

use crate::errors::Result;
use crate::nodes::{EntityKind, Node};
use crate::records::HierarchyFields;

use super::identity;

/// Attach `parent` / `children` identities read off the raw record.
///
/// Jobs carry no same-type hierarchy and pass through unchanged. A
/// `parent_id` of `0` (or null) means no parent; `child_ids` entries of `0`
/// are skipped for the same reason, since the sentinel never resolves.
pub fn link_hierarchy(record: &Value, mut node: Node) -> Result<Node> {
    if node.kind == EntityKind::Job {
        return Ok(node);
    }

    let fields = HierarchyFields::from_record(record)?;

    if let Some(parent_id) = fields.parent_id.filter(|id| *id != 0) {
        node.parent = Some(identity::resolve(node.kind, parent_id)?);
    }
    node.children = fields
        .child_ids
        .iter()
        .filter(|id| **id != 0)
        .map(|id| identity::resolve(node.kind, *id))
        .collect::<Result<Vec<_>>>()?;

    Ok(node)
}
