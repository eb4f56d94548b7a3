use std::path::PathBuf;

use thiserror::Error;

/// The error surface of the indexing pipeline, covering every failure
/// mode named by the external interface: parsing, query evaluation,
/// reference resolution, schema validation, I/O, the store, and config.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to parse {path}: {reason}")]
    ParseFailure { path: PathBuf, reason: String },

    #[error("query on {path} exceeded the {timeout_ms}ms budget")]
    QueryTimeout { path: PathBuf, timeout_ms: u64 },

    #[error("reference {name:?} in {path} could not be resolved")]
    UnresolvedReference { path: PathBuf, name: String },

    #[error("edge {edge_kind:?} cannot connect {from_kind:?} -> {to_kind:?}")]
    SchemaViolation {
        edge_kind: crate::types::EdgeKind,
        from_kind: crate::types::NodeKind,
        to_kind: crate::types::NodeKind,
    },

    #[error("I/O error at {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("graph store failure: {0}")]
    StoreFailure(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl From<rusqlite::Error> for IndexError {
    fn from(e: rusqlite::Error) -> Self {
        IndexError::StoreFailure(e.to_string())
    }
}
