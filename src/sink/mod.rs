//! Downstream graph sink abstraction.
//!
//! The engine hands the sink a flat sequence of reference-only nodes; the
//! sink is responsible for turning identity references into queryable edges
//! and for diffing fingerprints against previously stored nodes.

use std::sync::Mutex;

use crate::errors::Result;
use crate::nodes::Node;

/// Trait representing the downstream graph/content store.
#[allow(async_fn_in_trait)]
pub trait GraphSink: Send + Sync {
    /// Persist one normalized node.
    async fn create_node(&self, node: Node) -> Result<()>;
}

/// In-memory sink collecting nodes in emission order.
///
/// The reference sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    nodes: Mutex<Vec<Node>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every node created so far, in emission order.
    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.lock().expect("sink lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().expect("sink lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GraphSink for MemorySink {
    async fn create_node(&self, node: Node) -> Result<()> {
        self.nodes.lock().expect("sink lock poisoned").push(node);
        Ok(())
    }
}
