//! The code graph's node and edge vocabulary (spec §3).

use serde::{Deserialize, Serialize};

/// The kind of a graph node. `Unparsed` stands in for a name the
/// resolver could not bind to a real definition (spec §4.4 fallback,
/// invariant I5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Directory,
    File,
    Class,
    Interface,
    Function,
    Variable,
    OtherType,
    Unparsed,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Directory,
        NodeKind::File,
        NodeKind::Class,
        NodeKind::Interface,
        NodeKind::Function,
        NodeKind::Variable,
        NodeKind::OtherType,
        NodeKind::Unparsed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
            NodeKind::Class => "class",
            NodeKind::Interface => "interface",
            NodeKind::Function => "function",
            NodeKind::Variable => "variable",
            NodeKind::OtherType => "other_type",
            NodeKind::Unparsed => "unparsed",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<NodeKind> {
        Some(match s {
            "directory" => NodeKind::Directory,
            "file" => NodeKind::File,
            "class" => NodeKind::Class,
            "interface" => NodeKind::Interface,
            "function" => NodeKind::Function,
            "variable" => NodeKind::Variable,
            "other_type" => NodeKind::OtherType,
            "unparsed" => NodeKind::Unparsed,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Contains,
    Imports,
    Inherits,
    References,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Imports => "imports",
            EdgeKind::Inherits => "inherits",
            EdgeKind::References => "references",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<EdgeKind> {
        Some(match s {
            "contains" => EdgeKind::Contains,
            "imports" => EdgeKind::Imports,
            "inherits" => EdgeKind::Inherits,
            "references" => EdgeKind::References,
            _ => return None,
        })
    }
}

/// A node's identity within the graph: its kind plus its fully
/// qualified name (invariant I1 — `(kind, name)` is unique).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeRef {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into() }
    }
}

/// A materialised graph node. Fields that do not apply to a given
/// `kind` are left at their default (e.g. `skeleton_code` is empty for
/// a `Variable`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    /// Every short (unqualified) name this node can be referred to by
    /// within its own scope — plural because languages like Python let
    /// a class be reached by more than one alias (`import x as y`).
    pub short_names: Vec<String>,
    pub path: Option<String>,
    pub language: Option<String>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    pub code: Option<String>,
    pub skeleton_code: Option<String>,
}

impl Node {
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.kind, self.name.clone())
    }
}

/// A materialised, schema-validated graph edge. Endpoints carry their
/// own kind tag rather than relying on a join against a nodes table,
/// per spec §9's tagged-variant resolution of the endpoint-polymorphism
/// open question.
///
/// `import`/`alias` only carry data for `EdgeKind::Imports` (the
/// original symbol and its local binding, spec §3); every other edge
/// kind leaves both `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,
    pub from: NodeRef,
    pub to: NodeRef,
    pub import: Option<String>,
    pub alias: Option<String>,
}

impl Edge {
    pub fn new(kind: EdgeKind, from: NodeRef, to: NodeRef) -> Self {
        Self { kind, from, to, import: None, alias: None }
    }

    /// Attach import/alias metadata (spec §3's `IMPORTS` edge attributes).
    pub fn with_import(mut self, import: impl Into<String>, alias: impl Into<String>) -> Self {
        self.import = Some(import.into());
        self.alias = Some(alias.into());
        self
    }
}
