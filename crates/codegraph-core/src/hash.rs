//! Deterministic node-id derivation.
//!
//! Unlike a database auto-increment counter, an id derived purely from
//! `(kind, name)` is identical across repeated indexing runs, which is
//! what lets `bulk_upsert` behave idempotently (P2): re-indexing an
//! unchanged repository produces the same ids, so `INSERT OR REPLACE`
//! overwrites rather than duplicates.

use xxhash_rust::xxh64::xxh64;

use crate::types::NodeKind;

/// Compute the stable id for a node identified by `(kind, name)`.
pub fn node_id(kind: NodeKind, name: &str) -> i64 {
    let mut input = String::with_capacity(name.len() + 1 + kind.as_str().len());
    input.push_str(kind.as_str());
    input.push('\0');
    input.push_str(name);
    // xxh64 returns a u64; truncate to i64 range for SQLite's INTEGER
    // primary key, which is a signed 64-bit value.
    (xxh64(input.as_bytes(), 0) & 0x7fff_ffff_ffff_ffff) as i64
}
