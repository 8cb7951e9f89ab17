//! Deterministic identity resolution.
//!
//! Maps `(EntityKind, remote id)` to a stable [`NodeId`] via UUIDv5 over a
//! fixed crate namespace and the seed `Greenhouse{Kind}-{id}`. Pure and
//! injective: equal inputs always yield equal ids, distinct inputs never
//! collide.

use serde_json::Value;
use uuid::Uuid;

use crate::errors::{Result, SourceError};
use crate::nodes::{EntityKind, NodeId};

/// Namespace for all identities minted by this source. Fixed forever;
/// changing it would re-key every previously emitted node.
const IDENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x8f3c_1b6a_42d0_4b7e_9a15_27c3_e8d4_6f01);

/// Seed prefix matching the source's node naming scheme.
const TYPE_PREFIX: &str = "Greenhouse";

/// Resolve `(kind, remote_id)` to a stable identity.
///
/// `0` is the API's sentinel for "no entity" and must never resolve.
pub fn resolve(kind: EntityKind, remote_id: i64) -> Result<NodeId> {
    if remote_id == 0 {
        return Err(SourceError::InvalidRemoteId(format!(
            "{kind} remote id 0 is the reserved sentinel"
        )));
    }
    let seed = format!("{TYPE_PREFIX}{}-{remote_id}", kind.type_tag());
    Ok(NodeId(Uuid::new_v5(&IDENTITY_NAMESPACE, seed.as_bytes())))
}

/// Resolve the raw `id` field of a record.
///
/// Absent or non-numeric ids surface as [`SourceError::InvalidRemoteId`],
/// same as the sentinel.
pub fn resolve_raw(kind: EntityKind, id: Option<&Value>) -> Result<NodeId> {
    let id = id.ok_or_else(|| {
        SourceError::InvalidRemoteId(format!("{kind} record has no id field"))
    })?;
    let remote_id = id.as_i64().ok_or_else(|| {
        SourceError::InvalidRemoteId(format!("{kind} id is not an integer: {id}"))
    })?;
    resolve(kind, remote_id)
}
