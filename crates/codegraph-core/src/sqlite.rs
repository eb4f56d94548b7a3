//! SQLite-backed implementation of [`crate::store::GraphStore`].
//!
//! The schema is two tables: a `nodes` table keyed by the deterministic
//! `(kind, name)` id (see [`crate::hash`]), and an `edges` table whose
//! rows name their endpoints by `(kind, name)` pairs rather than a
//! foreign key, which keeps `Unparsed` placeholder endpoints ordinary
//! rows instead of a special case.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{IndexError, Result};
use crate::hash::node_id;
use crate::types::{Edge, EdgeKind, Node, NodeKind};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY,
    kind TEXT NOT NULL CHECK(kind IN ('directory','file','class','interface','function','variable','other_type','unparsed')),
    name TEXT NOT NULL,
    short_names TEXT NOT NULL,
    path TEXT,
    language TEXT,
    start_line INTEGER,
    end_line INTEGER,
    code TEXT,
    skeleton_code TEXT,
    UNIQUE(kind, name)
);

CREATE TABLE IF NOT EXISTS edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL CHECK(kind IN ('contains','imports','inherits','references')),
    from_kind TEXT NOT NULL,
    from_name TEXT NOT NULL,
    to_kind TEXT NOT NULL,
    to_name TEXT NOT NULL,
    import TEXT NOT NULL DEFAULT '',
    alias TEXT NOT NULL DEFAULT '',
    UNIQUE(kind, from_kind, from_name, to_kind, to_name, import, alias)
);

CREATE INDEX IF NOT EXISTS idx_edges_from ON edges(from_kind, from_name);
CREATE INDEX IF NOT EXISTS idx_edges_to ON edges(to_kind, to_name, kind);
CREATE INDEX IF NOT EXISTS idx_nodes_name ON nodes(name);
";

pub struct SqliteGraphStore {
    conn: Connection,
    dir: Option<PathBuf>,
}

impl SqliteGraphStore {
    /// Open (creating if absent) the store at `dir/graph.db`.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|source| IndexError::IoFailure {
            path: dir.to_path_buf(),
            source,
        })?;
        let conn = Connection::open(dir.join("graph.db"))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, dir: Some(dir.to_path_buf()) })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, dir: None })
    }

    fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<Node> {
        let kind_str: String = row.get("kind")?;
        let short_names_json: String = row.get("short_names")?;
        Ok(Node {
            kind: NodeKind::from_str_opt(&kind_str).unwrap_or(NodeKind::Unparsed),
            name: row.get("name")?,
            short_names: serde_json::from_str(&short_names_json).unwrap_or_default(),
            path: row.get("path")?,
            language: row.get("language")?,
            start_line: row.get::<_, Option<i64>>("start_line")?.map(|v| v as u32),
            end_line: row.get::<_, Option<i64>>("end_line")?.map(|v| v as u32),
            code: row.get("code")?,
            skeleton_code: row.get("skeleton_code")?,
        })
    }
}

impl crate::store::GraphStore for SqliteGraphStore {
    fn bulk_upsert(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO nodes
                 (id, kind, name, short_names, path, language, start_line, end_line, code, skeleton_code)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for node in nodes {
                let id = node_id(node.kind, &node.name);
                let short_names = serde_json::to_string(&node.short_names).unwrap_or_default();
                stmt.execute(params![
                    id,
                    node.kind.as_str(),
                    node.name,
                    short_names,
                    node.path,
                    node.language,
                    node.start_line,
                    node.end_line,
                    node.code,
                    node.skeleton_code,
                ])?;
            }
        }
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO edges (kind, from_kind, from_name, to_kind, to_name, import, alias)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for edge in edges {
                stmt.execute(params![
                    edge.kind.as_str(),
                    edge.from.kind.as_str(),
                    edge.from.name,
                    edge.to.kind.as_str(),
                    edge.to.name,
                    edge.import.as_deref().unwrap_or(""),
                    edge.alias.as_deref().unwrap_or(""),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<crate::store::QueryRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: rusqlite::types::Value = row.get(i)?;
                values.push(sqlite_value_to_json(value));
            }
            Ok(values)
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(IndexError::from)
    }

    fn get_node(&self, kind: NodeKind, name: &str) -> Result<Option<Node>> {
        self.conn
            .query_row(
                "SELECT * FROM nodes WHERE kind = ?1 AND name = ?2",
                params![kind.as_str(), name],
                Self::row_to_node,
            )
            .optional()
            .map_err(IndexError::from)
    }

    fn children(&self, kind: NodeKind, name: &str) -> Result<Vec<Node>> {
        let mut stmt = self.conn.prepare(
            "SELECT n.* FROM nodes n
             JOIN edges e ON e.to_kind = n.kind AND e.to_name = n.name
             WHERE e.kind = 'contains' AND e.from_kind = ?1 AND e.from_name = ?2",
        )?;
        let rows = stmt.query_map(params![kind.as_str(), name], Self::row_to_node)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(IndexError::from)
    }

    fn incoming(&self, edge_kind: EdgeKind, kind: NodeKind, name: &str) -> Result<Vec<Edge>> {
        let mut stmt = self.conn.prepare(
            "SELECT from_kind, from_name, to_kind, to_name, import, alias FROM edges
             WHERE kind = ?1 AND to_kind = ?2 AND to_name = ?3",
        )?;
        let rows = stmt.query_map(params![edge_kind.as_str(), kind.as_str(), name], |row| {
            let from_kind: String = row.get(0)?;
            let from_name: String = row.get(1)?;
            let to_kind: String = row.get(2)?;
            let to_name: String = row.get(3)?;
            let import: String = row.get(4)?;
            let alias: String = row.get(5)?;
            let mut edge = Edge::new(
                edge_kind,
                crate::types::NodeRef::new(NodeKind::from_str_opt(&from_kind).unwrap_or(NodeKind::Unparsed), from_name),
                crate::types::NodeRef::new(NodeKind::from_str_opt(&to_kind).unwrap_or(NodeKind::Unparsed), to_name),
            );
            if !import.is_empty() || !alias.is_empty() {
                edge.import = Some(import);
                edge.alias = Some(alias);
            }
            Ok(edge)
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(IndexError::from)
    }

    fn clean(&mut self, delete_directory: bool) -> Result<()> {
        self.conn.execute_batch("DELETE FROM edges; DELETE FROM nodes;")?;
        if delete_directory {
            if let Some(dir) = self.dir.take() {
                std::fs::remove_dir_all(&dir).map_err(|source| IndexError::IoFailure { path: dir, source })?;
            }
        }
        Ok(())
    }
}

fn sqlite_value_to_json(value: rusqlite::types::Value) -> serde_json::Value {
    use rusqlite::types::Value as V;
    match value {
        V::Null => serde_json::Value::Null,
        V::Integer(i) => serde_json::Value::from(i),
        V::Real(f) => serde_json::json!(f),
        V::Text(s) => serde_json::Value::String(s),
        V::Blob(b) => serde_json::json!(b),
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
