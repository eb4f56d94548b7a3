//! MCP (stdio) and HTTP transport shells for codegraph (spec §2's
//! "language-binding shells" and "transport layers", brought fully
//! into scope by SPEC_FULL §1). Neither shell carries indexing logic
//! of its own — both lock a shared [`CodeGraph`] and forward to it.

pub mod http;
pub mod mcp;
pub mod mcp_stdio;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use codegraph_core::config::Config;
use codegraph_core::IndexError;
use codegraph_index::CodeGraph;

/// Shared server state. Uses `std::sync::Mutex` because
/// `rusqlite::Connection` (inside `CodeGraph`'s store) is `!Sync` —
/// every access goes through `.lock()`, so keep critical sections
/// short.
pub type SharedCodeGraph = Arc<Mutex<CodeGraph>>;

pub struct CodegraphServer {
    pub graph: SharedCodeGraph,
    pub repo_dir: PathBuf,
}

impl CodegraphServer {
    pub fn open(db_dir: &std::path::Path, repo_dir: PathBuf, config: Option<Config>) -> Result<Self, IndexError> {
        let graph = CodeGraph::open(db_dir, &repo_dir, config)?;
        Ok(Self { graph: Arc::new(Mutex::new(graph)), repo_dir })
    }
}
