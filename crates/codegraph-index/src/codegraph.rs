//! `CodeGraph(db_dir, repo_dir, config?)` (spec §6): the persistent
//! pipeline entry point. Wraps the sqlite-backed [`GraphStore`] plus
//! the in-memory [`SymbolTable`] built by the most recent `index` call,
//! so `get_func_param_types` has something to resolve parameter types
//! against without re-parsing the whole repo.

use std::path::{Path, PathBuf};

use codegraph_core::config::Config;
use codegraph_core::sqlite::SqliteGraphStore;
use codegraph_core::store::{GraphStore, QueryRow};
use codegraph_core::IndexError;

use crate::assembler::Assembler;
use crate::func_param_types::{self, ParamTypeSnippet};
use crate::pipeline::{self, CancellationToken};
use crate::resolver::Resolver;
use crate::symbol_table::{FileIndex, ImportTarget, SymbolTable};

/// The persistent indexing pipeline: opens (or creates) a graph store
/// at `db_dir` and indexes `repo_dir` into it.
pub struct CodeGraph {
    repo_dir: PathBuf,
    config: Config,
    store: SqliteGraphStore,
    symbol_table: SymbolTable,
}

impl CodeGraph {
    pub fn open(db_dir: &Path, repo_dir: &Path, config: Option<Config>) -> Result<Self, IndexError> {
        let config = config.unwrap_or_default();
        config.validate()?;
        let store = SqliteGraphStore::open(db_dir)?;
        Ok(Self { repo_dir: repo_dir.to_path_buf(), config, store, symbol_table: SymbolTable::new() })
    }

    /// Index the repository. `paths` empty or `incremental = false`
    /// triggers a full re-walk; otherwise only the named paths are
    /// re-parsed and every other file's previously stored definitions
    /// are reused as-is for resolution (spec §1's narrowing of the
    /// `incremental` non-goal into *scoped* re-indexing — no automatic
    /// change detection, the caller names what changed).
    pub fn index(&mut self, paths: &[PathBuf], incremental: bool) -> Result<usize, IndexError> {
        self.index_cancellable(paths, incremental, &CancellationToken::new())
    }

    pub fn index_cancellable(
        &mut self,
        paths: &[PathBuf],
        incremental: bool,
        cancel: &CancellationToken,
    ) -> Result<usize, IndexError> {
        if incremental && !paths.is_empty() {
            self.index_scoped(paths, cancel)
        } else {
            let built = pipeline::build_graph(&self.repo_dir, &self.config, cancel)?;
            if cancel.is_cancelled() {
                return Ok(built.files_visited);
            }
            self.store.bulk_upsert(&built.graph.nodes, &built.graph.edges)?;
            self.symbol_table = built.symbol_table;
            Ok(built.files_visited)
        }
    }

    /// Re-parse only `paths`, publishing their fresh `FileIndex`
    /// entries into the carried-forward symbol table (overwriting any
    /// stale entry for the same path) and resolving only the
    /// references those files themselves contain. Every other file's
    /// definitions and edges already in the store are left untouched.
    fn index_scoped(&mut self, paths: &[PathBuf], cancel: &CancellationToken) -> Result<usize, IndexError> {
        use codegraph_lang::registry::{LanguageTag, Registry};

        let registry = Registry::new().with_allow_list(self.config.languages.as_ref().map(|tags| {
            tags.iter().filter_map(|t| LanguageTag::from_str_opt(t)).collect()
        }));

        struct ScopedFile {
            relative_path: String,
            language: &'static str,
            source: String,
            definitions: Vec<codegraph_lang::Definition>,
            references: Vec<codegraph_lang::RawReference>,
        }

        let mut files = Vec::new();
        for path in paths {
            if cancel.is_cancelled() {
                break;
            }
            let absolute = self.repo_dir.join(path);
            let relative = path.to_string_lossy().to_string();
            let source = match std::fs::read_to_string(&absolute) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(path = %absolute.display(), error = %e, "skipping file: read failed");
                    continue;
                }
            };
            let Some(support) = registry.dispatch(&absolute) else { continue };
            let relative_ref = Path::new(&relative);
            match support.parse_file(relative_ref, &source) {
                Ok(result) => files.push(ScopedFile {
                    relative_path: relative,
                    language: LanguageTag::from_path(&absolute).map(|t| t.as_str()).unwrap_or("unknown"),
                    source,
                    definitions: result.definitions,
                    references: result.references,
                }),
                Err(e) => {
                    tracing::warn!(path = %relative, error = %e, "parse failed, recording a childless file");
                    files.push(ScopedFile {
                        relative_path: relative,
                        language: LanguageTag::from_path(&absolute).map(|t| t.as_str()).unwrap_or("unknown"),
                        source,
                        definitions: Vec::new(),
                        references: Vec::new(),
                    });
                }
            }
        }

        for file in &files {
            let mut index = FileIndex::new(file.relative_path.clone());
            for def in &file.definitions {
                index.insert_definition(def.clone());
            }
            for raw in &file.references {
                if raw.role == codegraph_lang::ReferenceRole::Import {
                    if let Some(alias) = &raw.alias {
                        let symbol = raw
                            .name_path
                            .first()
                            .filter(|s| raw.import_path.as_deref() != Some(s.as_str()))
                            .cloned();
                        index.insert_alias(
                            alias.clone(),
                            ImportTarget { source: raw.import_path.clone().unwrap_or_default(), symbol },
                        );
                    }
                }
            }
            self.symbol_table.publish(index);
        }

        if cancel.is_cancelled() {
            return Ok(files.len());
        }

        let resolver = Resolver::new(&self.symbol_table);
        let mut assembler = Assembler::new();
        for file in &files {
            assembler.register_file_path(&file.relative_path, file.language, &file.source);
            assembler.register_definitions(&file.relative_path, &file.definitions);
        }
        for file in &files {
            let lang = LanguageTag::from_str_opt(file.language).unwrap_or(LanguageTag::Python);
            for raw in &file.references {
                if let Some(edge) = resolver.resolve_to_edge(raw, lang) {
                    assembler.register_resolved_edge(edge);
                }
            }
        }

        let graph = assembler.finish();
        self.store.bulk_upsert(&graph.nodes, &graph.edges)?;
        Ok(files.len())
    }

    pub fn query(&self, q: &str) -> Result<Vec<QueryRow>, IndexError> {
        self.store.query(q)
    }

    pub fn clean(&mut self, delete_dir: bool) -> Result<(), IndexError> {
        self.symbol_table = SymbolTable::new();
        self.store.clean(delete_dir)
    }

    /// `CodeGraph.getFuncParamTypes(file_path, line)` (spec §6):
    /// resolves against the symbol table built by the most recent
    /// `index` call.
    pub fn get_func_param_types(&self, file_path: &str, line: u32) -> Vec<ParamTypeSnippet> {
        func_param_types::get_func_param_types(&self.symbol_table, file_path, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::types::NodeKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_index_then_query_and_clean() {
        let repo = tempdir().unwrap();
        let db = tempdir().unwrap();
        fs::write(repo.path().join("a.py"), "class D1:\n    pass\n").unwrap();

        let mut cg = CodeGraph::open(db.path(), repo.path(), None).unwrap();
        let visited = cg.index(&[], false).unwrap();
        assert_eq!(visited, 1);

        let rows = cg.query("SELECT COUNT(*) FROM nodes").unwrap();
        assert_eq!(rows.len(), 1);

        cg.clean(false).unwrap();
        let rows = cg.query("SELECT COUNT(*) FROM nodes").unwrap();
        assert_eq!(rows[0][0], serde_json::json!(0));
    }

    #[test]
    fn scoped_reindex_only_touches_named_paths() {
        let repo = tempdir().unwrap();
        let db = tempdir().unwrap();
        fs::write(repo.path().join("a.py"), "class D1:\n    pass\n").unwrap();
        fs::write(repo.path().join("b.py"), "class D2:\n    pass\n").unwrap();

        let mut cg = CodeGraph::open(db.path(), repo.path(), None).unwrap();
        cg.index(&[], false).unwrap();

        fs::write(repo.path().join("a.py"), "class D1:\n    pass\nclass D1b:\n    pass\n").unwrap();
        let visited = cg.index(&[PathBuf::from("a.py")], true).unwrap();
        assert_eq!(visited, 1);

        // The untouched file's definitions remain in the store.
        let rows = cg.query("SELECT name FROM nodes WHERE kind = 'class'").unwrap();
        let names: Vec<String> = rows.iter().map(|r| r[0].as_str().unwrap().to_string()).collect();
        assert!(names.contains(&"b.py#D2".to_string()));
        assert!(names.contains(&"a.py#D1b".to_string()));
    }

    #[test]
    fn func_param_types_resolves_after_index() {
        let repo = tempdir().unwrap();
        let db = tempdir().unwrap();
        fs::create_dir_all(repo.path()).unwrap();
        fs::write(
            repo.path().join("types.go"),
            "package main\n\ntype Address struct {\n\tCity string\n}\n",
        )
        .unwrap();
        fs::write(
            repo.path().join("main.go"),
            "package main\n\nfunc (u *User) SetAddress(a *Address) {\n}\n",
        )
        .unwrap();

        let mut cg = CodeGraph::open(db.path(), repo.path(), None).unwrap();
        cg.index(&[], false).unwrap();

        let snippets = cg.get_func_param_types("main.go", 3);
        assert!(snippets.iter().any(|s| s.path == "types.go"));
        let _ = NodeKind::Class;
    }
}
