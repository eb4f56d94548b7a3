//! The indexing pipeline (spec §5): `walk → {parse → extract → local
//! symbol table} → barrier → resolve → assemble → bulk upsert`. File
//! parsing and extraction run on a bounded rayon pool; resolution,
//! assembly, and upsert are single-threaded to preserve write ordering
//! (spec §5).

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use codegraph_core::config::Config;
use codegraph_core::store::GraphStore;
use codegraph_core::IndexError;
use codegraph_lang::registry::Registry;
use codegraph_lang::walker::FileWalker;
use codegraph_lang::{Definition, RawReference};

use crate::assembler::Assembler;
use crate::resolver::Resolver;
use crate::symbol_table::{FileIndex, ImportTarget, SymbolTable};

/// A token the controller checks between files and before bulk upsert
/// (spec §5 "Cancellation & timeouts"). Cloning shares the same flag.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct ExtractedFile {
    relative_path: String,
    language: &'static str,
    source: String,
    definitions: Vec<Definition>,
    references: Vec<RawReference>,
}

/// Result of walking, extracting, resolving, and assembling one repo,
/// short of persistence — shared by the persistent pipeline ([`run`])
/// and the one-shot [`crate::parser_api::Parser`].
pub struct BuiltGraph {
    pub graph: crate::assembler::AssembledGraph,
    pub symbol_table: SymbolTable,
    pub files_visited: usize,
}

/// Run one full indexing pass over `repo_root`, writing the result
/// into `store`. Returns the number of files visited.
pub fn run(repo_root: &Path, config: &Config, store: &mut dyn GraphStore, cancel: &CancellationToken) -> Result<usize, IndexError> {
    let built = build_graph(repo_root, config, cancel)?;
    if cancel.is_cancelled() {
        return Ok(built.files_visited);
    }
    store.bulk_upsert(&built.graph.nodes, &built.graph.edges)?;
    Ok(built.files_visited)
}

/// Walk, parse, extract, resolve, and assemble — without persisting
/// anything (spec §6's `Parser.parse`, one-shot extraction).
pub fn build_graph(repo_root: &Path, config: &Config, cancel: &CancellationToken) -> Result<BuiltGraph, IndexError> {
    build_graph_scoped(repo_root, repo_root, config, cancel)
}

/// Same as [`build_graph`], but the walk itself is rooted at
/// `walk_root` (a subdirectory of `repo_root`, or `repo_root` itself)
/// while every name stays relative to `repo_root` — this is what lets
/// `Parser.parse(repo_dir, code_dir)` scope extraction to a
/// subdirectory without shifting the fully-qualified names the
/// resolver and assembler key on (spec §6).
pub fn build_graph_scoped(
    repo_root: &Path,
    walk_root: &Path,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<BuiltGraph, IndexError> {
    let registry = Registry::new().with_allow_list(
        config.languages.as_ref().map(|tags| tags.iter().filter_map(|t| codegraph_lang::registry::LanguageTag::from_str_opt(t)).collect()),
    );
    let walker = FileWalker::new(walk_root);
    let entries = walker.walk(config);

    let extracted: Vec<Option<ExtractedFile>> = entries
        .par_iter()
        .map(|entry| {
            if cancel.is_cancelled() {
                return None;
            }
            let relative = entry.path.strip_prefix(repo_root).unwrap_or(&entry.path).to_string_lossy().to_string();
            let source = match std::fs::read_to_string(&entry.path) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(path = %entry.path.display(), error = %e, "skipping file: read failed");
                    return None;
                }
            };

            let Some(support) = registry.dispatch(&entry.path) else {
                return None;
            };
            let relative_path = Path::new(&relative);
            match support.parse_file(relative_path, &source) {
                Ok(result) => Some(ExtractedFile {
                    relative_path: relative,
                    language: entry.language.as_str(),
                    source,
                    definitions: result.definitions,
                    references: result.references,
                }),
                Err(e) => {
                    tracing::warn!(path = %relative, error = %e, "parse failed, recording a childless file");
                    Some(ExtractedFile {
                        relative_path: relative,
                        language: entry.language.as_str(),
                        source,
                        definitions: Vec::new(),
                        references: Vec::new(),
                    })
                }
            }
        })
        .collect();

    let files: Vec<ExtractedFile> = extracted.into_iter().flatten().collect();

    if cancel.is_cancelled() {
        return Ok(BuiltGraph { graph: Assembler::new().finish(), symbol_table: SymbolTable::new(), files_visited: files.len() });
    }

    // Barrier: publish every file's local index before any resolution
    // happens (spec §4.3, §5).
    let mut table = SymbolTable::new();
    for file in &files {
        let mut index = FileIndex::new(file.relative_path.clone());
        for def in &file.definitions {
            index.insert_definition(def.clone());
        }
        for raw in &file.references {
            if raw.role == codegraph_lang::ReferenceRole::Import {
                if let Some(alias) = &raw.alias {
                    let symbol = raw.name_path.first().filter(|s| raw.import_path.as_deref() != Some(s.as_str())).cloned();
                    index.insert_alias(
                        alias.clone(),
                        ImportTarget { source: raw.import_path.clone().unwrap_or_default(), symbol },
                    );
                }
            }
        }
        table.publish(index);
    }

    let resolver = Resolver::new(&table);
    let mut assembler = Assembler::new();

    for file in &files {
        assembler.register_file_path(&file.relative_path, file.language, &file.source);
        assembler.register_definitions(&file.relative_path, &file.definitions);
    }

    for file in &files {
        let lang = codegraph_lang::registry::LanguageTag::from_str_opt(file.language).unwrap_or(codegraph_lang::registry::LanguageTag::Python);
        for raw in &file.references {
            if let Some(edge) = resolver.resolve_to_edge(raw, lang) {
                assembler.register_resolved_edge(edge);
            }
        }
    }

    let files_visited = files.len();
    if cancel.is_cancelled() {
        return Ok(BuiltGraph { graph: assembler.finish(), symbol_table: table, files_visited });
    }

    let graph = assembler.finish();
    Ok(BuiltGraph { graph, symbol_table: table, files_visited })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::sqlite::SqliteGraphStore;
    use codegraph_core::types::NodeKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn indexes_a_small_python_repo() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "class Thing:\n    def run(self):\n        return 1\n").unwrap();

        let mut store = SqliteGraphStore::in_memory().unwrap();
        let count = run(dir.path(), &Config::default(), &mut store, &CancellationToken::new()).unwrap();
        assert_eq!(count, 1);

        let node = store.get_node(NodeKind::Class, "a.py#Thing").unwrap();
        assert!(node.is_some());
    }

    #[test]
    fn reindexing_the_same_repo_is_idempotent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "class Thing:\n    pass\n").unwrap();

        let mut store = SqliteGraphStore::in_memory().unwrap();
        run(dir.path(), &Config::default(), &mut store, &CancellationToken::new()).unwrap();
        let first: Vec<_> = store.query("SELECT COUNT(*) FROM nodes").unwrap();

        run(dir.path(), &Config::default(), &mut store, &CancellationToken::new()).unwrap();
        let second: Vec<_> = store.query("SELECT COUNT(*) FROM nodes").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn cancelled_before_walk_returns_early() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "class Thing:\n    pass\n").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let mut store = SqliteGraphStore::in_memory().unwrap();
        let count = run(dir.path(), &Config::default(), &mut store, &token).unwrap();
        assert_eq!(count, 0);
    }
}
