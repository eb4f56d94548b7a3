//! The Graph Store Adapter contract (spec §4.6). This is a frozen
//! contract: a new backend is added by writing a new implementation,
//! never by changing this trait.

use crate::error::Result;
use crate::types::{Edge, Node, NodeKind};

/// A single row of a raw query result. Column order matches the
/// `SELECT` the query string issued.
pub type QueryRow = Vec<serde_json::Value>;

pub trait GraphStore: Send {
    /// Insert or replace every node and edge. Always idempotent:
    /// re-running with identical input leaves the store unchanged
    /// (P2). Nodes are applied before edges within the same
    /// transaction so edges never reference a missing endpoint.
    fn bulk_upsert(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()>;

    /// Run a raw query against the store and return its rows.
    fn query(&self, sql: &str) -> Result<Vec<QueryRow>>;

    /// Look up a single node by its identity.
    fn get_node(&self, kind: NodeKind, name: &str) -> Result<Option<Node>>;

    /// Every direct child of a `Directory`/`File`/`Class`/`Interface`
    /// node, following `Contains` edges.
    fn children(&self, kind: NodeKind, name: &str) -> Result<Vec<Node>>;

    /// Every edge of `edge_kind` whose `to` endpoint matches
    /// `(kind, name)` — used to find callers/importers/subtypes.
    fn incoming(&self, edge_kind: crate::types::EdgeKind, kind: NodeKind, name: &str) -> Result<Vec<Edge>>;

    /// Delete every row from every table. If `delete_directory` is
    /// set, the backing storage directory itself is removed too.
    fn clean(&mut self, delete_directory: bool) -> Result<()>;
}
