//! `Parser(config?) ; Parser.parse(repo_dir, code_dir?) → { nodes,
//! relationships }` (spec §6): one-shot extraction with no persistence
//! step. Useful for callers that want the graph in memory (e.g. to
//! feed a different store, or to diff two runs) without ever touching
//! disk beyond reading source files.

use std::path::Path;

use codegraph_core::config::Config;
use codegraph_core::types::{Edge, Node};
use codegraph_core::IndexError;

use crate::pipeline::{self, CancellationToken};

/// The one-shot extraction result: every node and edge the pipeline
/// would have bulk-upserted, had a store been given.
#[derive(Debug, Default)]
pub struct ParseResult {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Edge>,
}

/// A configuration-only entry point that never opens a graph store.
pub struct Parser {
    config: Config,
}

impl Parser {
    pub fn new(config: Option<Config>) -> Self {
        Self { config: config.unwrap_or_default() }
    }

    /// Parse `repo_dir`, optionally scoped to the subdirectory
    /// `code_dir` (names stay relative to `repo_dir` regardless).
    pub fn parse(&self, repo_dir: &Path, code_dir: Option<&Path>) -> Result<ParseResult, IndexError> {
        self.config.validate()?;
        let walk_root = match code_dir {
            Some(sub) => repo_dir.join(sub),
            None => repo_dir.to_path_buf(),
        };
        let built = pipeline::build_graph_scoped(repo_dir, &walk_root, &self.config, &CancellationToken::new())?;
        Ok(ParseResult { nodes: built.graph.nodes, relationships: built.graph.edges })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::types::NodeKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_without_touching_a_store() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "class D1:\n    pass\n").unwrap();

        let parser = Parser::default();
        let result = parser.parse(dir.path(), None).unwrap();
        assert!(result.nodes.iter().any(|n| n.kind == NodeKind::Class && n.name == "a.py#D1"));
    }

    #[test]
    fn scopes_extraction_to_code_dir_while_keeping_repo_relative_names() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.py"), "class D1:\n    pass\n").unwrap();
        fs::write(dir.path().join("other.py"), "class Skip:\n    pass\n").unwrap();

        let parser = Parser::default();
        let result = parser.parse(dir.path(), Some(Path::new("src"))).unwrap();
        assert!(result.nodes.iter().any(|n| n.name == "src/a.py#D1"));
        assert!(!result.nodes.iter().any(|n| n.name.contains("Skip")));
    }
}
