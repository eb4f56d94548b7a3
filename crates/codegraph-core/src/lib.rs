//! Shared data model, error types, configuration, and the embedded graph
//! store adapter used by every other codegraph crate.

pub mod config;
pub mod error;
pub mod hash;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::IndexError;
pub use types::{Edge, EdgeKind, Node, NodeKind, NodeRef};
