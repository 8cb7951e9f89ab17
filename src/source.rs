//! End-to-end source run: fetch, normalize, emit.

use std::fmt;

use tracing::info;

use crate::errors::Result;
use crate::fetch::BoardFetcher;
use crate::normalize::{normalize, RawCollections};
use crate::sink::GraphSink;

/// Counts reported by one [`source_nodes`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub offices_fetched: usize,
    pub departments_fetched: usize,
    pub jobs_fetched: usize,
    pub nodes_created: usize,
}

impl fmt::Display for SourceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetched {} offices, {} departments, {} jobs; created {} nodes",
            self.offices_fetched, self.departments_fetched, self.jobs_fetched, self.nodes_created
        )
    }
}

/// Fetch the board's collections, run the normalization engine, and emit
/// every node to the sink.
///
/// All-or-nothing: if normalization fails, nothing reaches the sink. A sink
/// failure mid-emission propagates immediately; re-running is safe because
/// identities and fingerprints are deterministic.
pub async fn source_nodes<F, S>(fetcher: &F, sink: &S) -> Result<SourceSummary>
where
    F: BoardFetcher,
    S: GraphSink,
{
    info!("Fetching collections from the job board API");
    let raw = RawCollections {
        offices: fetcher.fetch_offices().await?,
        departments: fetcher.fetch_departments().await?,
        jobs: fetcher.fetch_jobs().await?,
    };
    info!(
        offices = raw.offices.len(),
        departments = raw.departments.len(),
        jobs = raw.jobs.len(),
        "Fetched raw collections"
    );

    let nodes = normalize(&raw)?;

    let summary = SourceSummary {
        offices_fetched: raw.offices.len(),
        departments_fetched: raw.departments.len(),
        jobs_fetched: raw.jobs.len(),
        nodes_created: nodes.len(),
    };

    for node in nodes {
        sink.create_node(node).await?;
    }
    info!(nodes = summary.nodes_created, "Emitted normalized nodes");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use crate::nodes::EntityKind;
    use crate::sink::MemorySink;
    use serde_json::{json, Value};

    /// Fetcher serving canned collections.
    struct StaticFetcher {
        offices: Vec<Value>,
        departments: Vec<Value>,
        jobs: Vec<Value>,
    }

    impl BoardFetcher for StaticFetcher {
        async fn fetch_offices(&self) -> Result<Vec<Value>> {
            Ok(self.offices.clone())
        }
        async fn fetch_departments(&self) -> Result<Vec<Value>> {
            Ok(self.departments.clone())
        }
        async fn fetch_jobs(&self) -> Result<Vec<Value>> {
            Ok(self.jobs.clone())
        }
    }

    #[tokio::test]
    async fn test_source_nodes_end_to_end() {
        let fetcher = StaticFetcher {
            offices: vec![json!({"id": 1, "departments": [{"id": 10, "jobs": [{"id": 100}]}]})],
            departments: vec![json!({"id": 10, "jobs": [{"id": 100}]}), json!({"id": 0})],
            jobs: vec![json!({"id": 100, "departments": [{"id": 10}], "offices": [{"id": 1}]})],
        };
        let sink = MemorySink::new();

        let summary = source_nodes(&fetcher, &sink).await.expect("run should succeed");

        assert_eq!(summary.offices_fetched, 1);
        assert_eq!(summary.departments_fetched, 2);
        assert_eq!(summary.jobs_fetched, 1);
        // The sentinel department is filtered out.
        assert_eq!(summary.nodes_created, 3);
        assert_eq!(sink.len(), 3);

        let kinds: Vec<EntityKind> = sink.nodes().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Office, EntityKind::Department, EntityKind::Job]
        );
    }

    #[tokio::test]
    async fn test_source_nodes_emits_nothing_on_engine_failure() {
        let fetcher = StaticFetcher {
            offices: vec![],
            departments: vec![json!({"id": 10, "jobs": {"id": 100}})],
            jobs: vec![],
        };
        let sink = MemorySink::new();

        let err = source_nodes(&fetcher, &sink).await.unwrap_err();
        assert!(matches!(err, SourceError::MalformedNestedPayload(_)));
        assert!(sink.is_empty());
    }
}
