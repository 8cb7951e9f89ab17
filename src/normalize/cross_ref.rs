//! Cross-type reference linking.
//!
//! The API embeds full sub-records across types: offices embed departments
//! (which embed jobs), and job postings independently embed their departments
//! and offices. This stage collapses every embedding into identity sets on
//! the owning node. Each side links purely from its own nested payload, so
//! the same job/department pair discovered from both directions always lands
//! on the same identities, regardless of processing order.

use serde_json::Value;

use crate::errors::Result;
use crate::nodes::{EntityKind, Node};
use crate::records::{nested_collection, NestedDepartment, NestedStub};

use super::identity;

/// Attach cross-type identity sets read off the raw record's nested
/// sub-collections.
///
/// - Office: nested departments fill `related_department_ids`; jobs nested
///   inside those departments accumulate into `related_job_ids`.
/// - Department: nested jobs fill `related_job_ids`.
/// - Job: nested departments and offices fill `related_department_ids` and
///   `related_office_ids`.
///
/// The sets deduplicate; nested sub-records themselves are never carried onto
/// the node.
pub fn link_cross_references(record: &Value, mut node: Node) -> Result<Node> {
    match node.kind {
        EntityKind::Office => {
            let departments: Vec<NestedDepartment> = nested_collection(record, "departments")?;
            for department in &departments {
                node.related_department_ids
                    .insert(identity::resolve(EntityKind::Department, department.id)?);
                for job in &department.jobs {
                    node.related_job_ids
                        .insert(identity::resolve(EntityKind::Job, job.id)?);
                }
            }
        }
        EntityKind::Department => {
            let jobs: Vec<NestedStub> = nested_collection(record, "jobs")?;
            for job in &jobs {
                node.related_job_ids
                    .insert(identity::resolve(EntityKind::Job, job.id)?);
            }
        }
        EntityKind::Job => {
            let departments: Vec<NestedStub> = nested_collection(record, "departments")?;
            for department in &departments {
                node.related_department_ids
                    .insert(identity::resolve(EntityKind::Department, department.id)?);
            }
            let offices: Vec<NestedStub> = nested_collection(record, "offices")?;
            for office in &offices {
                node.related_office_ids
                    .insert(identity::resolve(EntityKind::Office, office.id)?);
            }
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use crate::normalize::build::build_node;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn linked(record: Value, kind: EntityKind) -> Node {
        let node = build_node(&record, kind).unwrap();
        link_cross_references(&record, node).unwrap()
    }

    fn id(kind: EntityKind, remote_id: i64) -> crate::nodes::NodeId {
        identity::resolve(kind, remote_id).unwrap()
    }

    fn set<const N: usize>(ids: [crate::nodes::NodeId; N]) -> BTreeSet<crate::nodes::NodeId> {
        BTreeSet::from(ids)
    }

    #[test]
    fn test_office_collects_departments_and_their_jobs() {
        let node = linked(
            json!({
                "id": 1,
                "departments": [
                    {"id": 10, "jobs": [{"id": 100}, {"id": 101}]},
                    {"id": 11, "jobs": [{"id": 101}]}
                ]
            }),
            EntityKind::Office,
        );
        assert_eq!(
            node.related_department_ids,
            set([id(EntityKind::Department, 10), id(EntityKind::Department, 11)])
        );
        // Job 101 appears under both departments; the set deduplicates it.
        assert_eq!(
            node.related_job_ids,
            set([id(EntityKind::Job, 100), id(EntityKind::Job, 101)])
        );
    }

    #[test]
    fn test_department_collects_jobs() {
        let node = linked(
            json!({"id": 10, "jobs": [{"id": 100}]}),
            EntityKind::Department,
        );
        assert_eq!(node.related_job_ids, set([id(EntityKind::Job, 100)]));
        assert!(node.related_department_ids.is_empty());
        assert!(node.related_office_ids.is_empty());
    }

    #[test]
    fn test_job_collects_departments_and_offices() {
        let node = linked(
            json!({
                "id": 100,
                "departments": [{"id": 10}],
                "offices": [{"id": 1}]
            }),
            EntityKind::Job,
        );
        assert_eq!(
            node.related_department_ids,
            set([id(EntityKind::Department, 10)])
        );
        assert_eq!(node.related_office_ids, set([id(EntityKind::Office, 1)]));
    }

    #[test]
    fn test_no_nested_payload_leaves_sets_empty() {
        let node = linked(json!({"id": 1, "name": "Berlin"}), EntityKind::Office);
        assert!(node.related_department_ids.is_empty());
        assert!(node.related_job_ids.is_empty());
    }

    #[test]
    fn test_emitted_node_carries_no_nested_records() {
        let node = linked(
            json!({"id": 1, "departments": [{"id": 10, "jobs": [{"id": 100}]}]}),
            EntityKind::Office,
        );
        assert!(!node.fields.contains_key("departments"));
        assert!(!node.fields.contains_key("jobs"));
    }

    /// Linking is a pure function of the node's own payload: running it on a
    /// freshly built node yields identical sets every time.
    #[test]
    fn test_linking_is_idempotent_across_invocations() {
        let record = json!({
            "id": 100,
            "departments": [{"id": 10}],
            "offices": [{"id": 1}, {"id": 2}]
        });
        let first = linked(record.clone(), EntityKind::Job);
        let second = linked(record, EntityKind::Job);
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_array_nested_field_is_malformed() {
        let record = json!({"id": 10, "jobs": "none"});
        let node = build_node(&record, EntityKind::Department).unwrap();
        let err = link_cross_references(&record, node).unwrap_err();
        assert!(matches!(err, SourceError::MalformedNestedPayload(_)));
    }

    #[test]
    fn test_nested_record_without_id_is_inconsistent() {
        // The filter removes these before linking; seeing one here is a
        // pipeline defect and aborts the batch.
        let record = json!({"id": 10, "jobs": [{"title": "Engineer"}]});
        let node = build_node(&record, EntityKind::Department).unwrap();
        let err = link_cross_references(&record, node).unwrap_err();
        assert!(matches!(err, SourceError::InconsistentRecord(_)));
    }
}
