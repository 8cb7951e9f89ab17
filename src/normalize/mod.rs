//! Normalization and cross-reference linking engine.
//!
//! Turns the three raw API collections into a flat, reference-only entity
//! graph. The stages run in strict order, each a pure transformation:
//!
//! 1. **Filter** — strip sentinel records (id `0`, missing id) recursively
//! 2. **Build** — resolve identities, fingerprint, copy scalar fields
//! 3. **Hierarchy link** — same-type parent/child references
//! 4. **Cross-reference link** — many-to-many identity sets across types
//!
//! All-or-nothing: the first error aborts the whole batch, no partial graph
//! is ever returned. Identity determinism is the only continuity across
//! runs; the downstream store diffs fingerprints against earlier emissions.

pub mod build;
pub mod cross_ref;
pub mod filter;
pub mod hierarchy;
pub mod identity;

use serde_json::Value;

use crate::errors::Result;
use crate::nodes::{EntityKind, Node};

pub use build::build_node;
pub use cross_ref::link_cross_references;
pub use filter::filter_records;
pub use hierarchy::link_hierarchy;
pub use identity::resolve;

/// The three raw collections as materialized by the fetcher.
#[derive(Debug, Clone, Default)]
pub struct RawCollections {
    pub offices: Vec<Value>,
    pub departments: Vec<Value>,
    pub jobs: Vec<Value>,
}

/// Run the full engine over raw collections.
///
/// Output order is offices, then departments, then jobs, each in surviving
/// source order. Running twice on identical input yields identical nodes.
pub fn normalize(raw: &RawCollections) -> Result<Vec<Node>> {
    let offices = filter_records(&raw.offices)?;
    let departments = filter_records(&raw.departments)?;
    let jobs = filter_records(&raw.jobs)?;

    let records: Vec<(EntityKind, &Value)> = offices
        .iter()
        .map(|r| (EntityKind::Office, r))
        .chain(departments.iter().map(|r| (EntityKind::Department, r)))
        .chain(jobs.iter().map(|r| (EntityKind::Job, r)))
        .collect();

    let mut nodes = records
        .iter()
        .map(|(kind, record)| build_node(record, *kind))
        .collect::<Result<Vec<_>>>()?;

    nodes = records
        .iter()
        .zip(nodes)
        .map(|((_, record), node)| link_hierarchy(record, node))
        .collect::<Result<Vec<_>>>()?;

    nodes = records
        .iter()
        .zip(nodes)
        .map(|((_, record), node)| link_cross_references(record, node))
        .collect::<Result<Vec<_>>>()?;

    Ok(nodes)
}
