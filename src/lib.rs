//! # greenhouse-board-source
//!
//! Source connector for the Greenhouse job-board API: fetches a board's
//! offices, departments and jobs and normalizes them into a flat,
//! uniquely-identified entity graph for a downstream graph/content store.
//!
//! ## Architecture
//!
//! - **Deterministic identities**: UUIDv5 over `(kind, remote id)`, stable
//!   across runs — the join key for every reference
//! - **Recursive sentinel filtering**: placeholder records (id `0`) are
//!   stripped at any nesting depth before nodes are built
//! - **Reference-only linking**: nested sub-records collapse into identity
//!   sets; emitted nodes never embed other entities
//! - **All-or-nothing batches**: any malformed record aborts the run, no
//!   partial graph is emitted

pub mod errors;
pub mod fetch;
pub mod nodes;
pub mod normalize;
pub mod records;
pub mod sink;
pub mod source;
pub mod types;

pub use errors::{Result, SourceError};
pub use nodes::{EntityKind, Node, NodeId};
pub use normalize::{normalize, RawCollections};
pub use source::{source_nodes, SourceSummary};
pub use types::SourceConfig;
