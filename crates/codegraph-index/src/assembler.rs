//! The Graph Assembler (spec §4.5): turns every file's extracted
//! definitions plus every resolved edge into two deduplicated
//! collections (nodes keyed by name within kind, edges keyed by
//! `(kind, from, to, import?, alias?)`), ready for the Graph Store
//! Adapter in Directory→File→definitions→edges order.

use std::collections::{BTreeSet, HashMap, HashSet};

use codegraph_core::types::{Edge, EdgeKind, Node, NodeKind, NodeRef};
use codegraph_lang::Definition;

#[derive(Debug, Default)]
pub struct AssembledGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Default)]
pub struct Assembler {
    nodes: HashMap<(NodeKind, String), Node>,
    edges: HashSet<(EdgeKind, String, String, Option<String>, Option<String>)>,
    ordered_edges: Vec<Edge>,
    directories: BTreeSet<String>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert_node(&mut self, node: Node) {
        self.nodes.entry((node.kind, node.name.clone())).or_insert(node);
    }

    fn push_edge(&mut self, edge: Edge) {
        let key = (edge.kind, edge.from.name.clone(), edge.to.name.clone(), edge.import.clone(), edge.alias.clone());
        if self.edges.insert(key) {
            self.ordered_edges.push(edge);
        }
    }

    /// Record every ancestor directory of `file_path` up to the repo
    /// root, so every File has a complete CONTAINS chain to the root
    /// (invariant I3).
    pub fn register_file_path(&mut self, file_path: &str, language: &str, code: &str) {
        let path = std::path::Path::new(file_path);
        let mut ancestors: Vec<String> = Vec::new();
        let mut current = path.parent();
        while let Some(dir) = current {
            let dir_str = dir.to_string_lossy().to_string();
            if dir_str.is_empty() {
                break;
            }
            ancestors.push(dir_str.clone());
            self.directories.insert(dir_str);
            current = dir.parent();
        }

        self.upsert_node(Node {
            kind: NodeKind::File,
            name: file_path.to_string(),
            short_names: vec![path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| file_path.to_string())],
            path: Some(file_path.to_string()),
            language: Some(language.to_string()),
            start_line: None,
            end_line: None,
            code: Some(code.to_string()),
            skeleton_code: None,
        });

        // Directory CONTAINS Directory (parent→child) and the deepest
        // directory CONTAINS the file.
        ancestors.sort_by_key(|a| a.matches('/').count());
        for pair in ancestors.windows(2) {
            self.push_edge(Edge::new(
                EdgeKind::Contains,
                NodeRef::new(NodeKind::Directory, pair[1].clone()),
                NodeRef::new(NodeKind::Directory, pair[0].clone()),
            ));
        }
        if let Some(deepest) = ancestors.first() {
            self.push_edge(Edge::new(
                EdgeKind::Contains,
                NodeRef::new(NodeKind::Directory, deepest.clone()),
                NodeRef::new(NodeKind::File, file_path.to_string()),
            ));
        }
        for dir in &ancestors {
            self.nodes.entry((NodeKind::Directory, dir.clone())).or_insert_with(|| Node {
                kind: NodeKind::Directory,
                name: dir.clone(),
                short_names: vec![std::path::Path::new(dir).file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| dir.clone())],
                path: Some(dir.clone()),
                language: None,
                start_line: None,
                end_line: None,
                code: None,
                skeleton_code: None,
            });
        }
    }

    /// Register every definition extracted from one file and the
    /// CONTAINS edges that anchor it (File→definition, or
    /// Class/Interface→method for nested definitions).
    pub fn register_definitions(&mut self, file_path: &str, definitions: &[Definition]) {
        for def in definitions {
            self.upsert_node(Node {
                kind: def.kind,
                name: def.name.clone(),
                short_names: def.short_names.clone(),
                path: Some(file_path.to_string()),
                language: None,
                start_line: Some(def.start_line),
                end_line: Some(def.end_line),
                code: Some(def.code.clone()),
                skeleton_code: if def.skeleton_code.is_empty() { None } else { Some(def.skeleton_code.clone()) },
            });

            let container = match &def.parent {
                Some(parent_name) => definitions
                    .iter()
                    .find(|d| d.short_names.contains(parent_name) || d.name.ends_with(&format!("#{parent_name}")))
                    .map(|d| NodeRef::new(d.kind, d.name.clone()))
                    .unwrap_or_else(|| NodeRef::new(NodeKind::File, file_path.to_string())),
                None => NodeRef::new(NodeKind::File, file_path.to_string()),
            };

            self.push_edge(Edge::new(EdgeKind::Contains, container, def.node_ref()));
        }
    }

    pub fn register_resolved_edge(&mut self, edge: Edge) {
        self.push_edge(edge);
    }

    /// Emit an `Unparsed` node for every Unparsed target referenced by
    /// an already-registered edge that isn't already a real node
    /// (invariant I5: created on demand, deduplicated by name).
    fn materialise_unparsed_nodes(&mut self) {
        let unparsed_names: Vec<String> = self
            .ordered_edges
            .iter()
            .flat_map(|e| [&e.from, &e.to])
            .filter(|r| r.kind == NodeKind::Unparsed)
            .map(|r| r.name.clone())
            .collect();
        for name in unparsed_names {
            self.nodes.entry((NodeKind::Unparsed, name.clone())).or_insert_with(|| Node {
                kind: NodeKind::Unparsed,
                name,
                short_names: Vec::new(),
                path: None,
                language: None,
                start_line: None,
                end_line: None,
                code: None,
                skeleton_code: None,
            });
        }
    }

    /// Finalise into dependency order: Directories, then Files, then
    /// contained definitions, then edges (spec §4.5).
    pub fn finish(mut self) -> AssembledGraph {
        self.materialise_unparsed_nodes();

        let rank = |k: NodeKind| -> u8 {
            match k {
                NodeKind::Directory => 0,
                NodeKind::File => 1,
                NodeKind::Class | NodeKind::Interface | NodeKind::Function | NodeKind::Variable | NodeKind::OtherType => 2,
                NodeKind::Unparsed => 3,
            }
        };
        let mut nodes: Vec<Node> = self.nodes.into_values().collect();
        nodes.sort_by(|a, b| rank(a.kind).cmp(&rank(b.kind)).then_with(|| a.name.cmp(&b.name)));

        AssembledGraph { nodes, edges: self.ordered_edges }
    }
}
