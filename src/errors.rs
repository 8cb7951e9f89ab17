//! Error types for greenhouse-board-source.

/// Alias for Results returning [`SourceError`].
pub type Result<T> = std::result::Result<T, SourceError>;

/// Top-level error type for the source connector.
///
/// The three normalization variants (`InvalidRemoteId`, `InconsistentRecord`,
/// `MalformedNestedPayload`) are unrecoverable for the batch being processed:
/// the engine never emits a partial graph.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A remote id was absent, non-numeric, or the reserved sentinel `0`.
    #[error("Invalid remote id: {0}")]
    InvalidRemoteId(String),

    /// A record without a valid identity reached a linking stage, which the
    /// filter stage should have made impossible.
    #[error("Inconsistent record: {0}")]
    InconsistentRecord(String),

    /// A nested sub-collection field was present but not an array of records.
    #[error("Malformed nested payload: {0}")]
    MalformedNestedPayload(String),

    /// Configuration error (missing or invalid environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connection, timeout, body decode).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the boards API.
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Downstream graph sink rejected a node.
    #[error("Sink error: {0}")]
    Sink(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
