//! The Symbol Table (spec §4.3): a per-file index built eagerly during
//! extraction, and a repo-global index built after every file is
//! extracted (the barrier spec §5 requires before resolution starts).

use std::collections::HashMap;

use codegraph_lang::Definition;

/// One file's local index: short name → definition, plus import
/// aliases introduced by that file's own import statements.
#[derive(Debug, Default, Clone)]
pub struct FileIndex {
    pub file_path: String,
    /// short_name → index into `definitions`.
    by_short_name: HashMap<String, Vec<usize>>,
    pub definitions: Vec<Definition>,
    /// local alias → import target, keyed by the alias the import
    /// statement bound locally (spec §4.3).
    pub aliases: HashMap<String, ImportTarget>,
}

#[derive(Debug, Clone)]
pub struct ImportTarget {
    /// The raw import source as written (module path, package path, or
    /// relative specifier).
    pub source: String,
    /// The specific symbol imported from `source`, if any (absent for
    /// whole-module/namespace imports).
    pub symbol: Option<String>,
}

impl FileIndex {
    pub fn new(file_path: String) -> Self {
        Self { file_path, ..Default::default() }
    }

    pub fn insert_definition(&mut self, def: Definition) {
        let idx = self.definitions.len();
        for short in &def.short_names {
            self.by_short_name.entry(short.clone()).or_default().push(idx);
        }
        self.definitions.push(def);
    }

    pub fn insert_alias(&mut self, alias: String, target: ImportTarget) {
        self.aliases.insert(alias, target);
    }

    /// Local lookup (resolver rule 1, spec §4.4): every definition in
    /// this file reachable by `short_name`, first-defined wins when
    /// more than one would match the same short name after
    /// disambiguation.
    pub fn lookup(&self, short_name: &str) -> Option<&Definition> {
        self.by_short_name.get(short_name).and_then(|idxs| idxs.first()).map(|&i| &self.definitions[i])
    }

    pub fn lookup_alias(&self, alias: &str) -> Option<&ImportTarget> {
        self.aliases.get(alias)
    }
}

/// The repo-global index (spec §4.3), built only after every file's
/// local extraction has completed — the resolver barrier (spec §5).
#[derive(Debug, Default)]
pub struct SymbolTable {
    pub files: HashMap<String, FileIndex>,
    /// short_name → every definition reachable by that name anywhere
    /// in the repo, for the repo-global unique-match fallback
    /// (resolver rule 4).
    global_by_short_name: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish one file's completed local index into the repo-global
    /// table. Insertions are serialised by file (spec §4.3): callers
    /// must not call this concurrently for the same table.
    pub fn publish(&mut self, file_index: FileIndex) {
        for def in &file_index.definitions {
            for short in &def.short_names {
                self.global_by_short_name.entry(short.clone()).or_default().push(def.name.clone());
            }
        }
        self.files.insert(file_index.file_path.clone(), file_index);
    }

    pub fn file(&self, path: &str) -> Option<&FileIndex> {
        self.files.get(path)
    }

    pub fn definition_by_name<'a>(&'a self, fqname: &str) -> Option<&'a Definition> {
        let file_path = fqname.split('#').next()?;
        let file = self.files.get(file_path)?;
        file.definitions.iter().find(|d| d.name == fqname)
    }

    /// Repo-global unique lookup (resolver rule 4, spec §4.4): returns
    /// the sole definition reachable by `short_name`, or `None` if zero
    /// or more than one file defines it (an ambiguous match falls
    /// through to Unparsed rather than guessing).
    pub fn unique_global(&self, short_name: &str) -> Option<&Definition> {
        let names = self.global_by_short_name.get(short_name)?;
        if names.len() != 1 {
            return None;
        }
        self.definition_by_name(&names[0])
    }

    /// Every file whose path shares `dir` as its parent directory
    /// (Go's same-package lookup, resolver rule 3, spec §4.4).
    pub fn files_in_directory<'a>(&'a self, dir: &str) -> Vec<&'a FileIndex> {
        self.files
            .values()
            .filter(|f| std::path::Path::new(&f.file_path).parent().map(|p| p.to_string_lossy().to_string()).as_deref() == Some(dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::types::NodeKind;

    fn def(name: &str, short: &[&str]) -> Definition {
        Definition {
            kind: NodeKind::Function,
            name: name.to_string(),
            short_names: short.iter().map(|s| s.to_string()).collect(),
            start_line: 1,
            end_line: 2,
            code: String::new(),
            skeleton_code: String::new(),
            params: Vec::new(),
            receiver_type: None,
            first_return_type: None,
            parent: None,
        }
    }

    #[test]
    fn local_lookup_finds_definition_by_short_name() {
        let mut file = FileIndex::new("a.py".to_string());
        file.insert_definition(def("a.py#foo", &["foo"]));
        assert!(file.lookup("foo").is_some());
        assert!(file.lookup("bar").is_none());
    }

    #[test]
    fn global_unique_lookup_requires_single_match() {
        let mut table = SymbolTable::new();
        let mut a = FileIndex::new("a.py".to_string());
        a.insert_definition(def("a.py#foo", &["foo"]));
        table.publish(a);

        assert!(table.unique_global("foo").is_some());

        let mut b = FileIndex::new("b.py".to_string());
        b.insert_definition(def("b.py#foo", &["foo"]));
        table.publish(b);

        assert!(table.unique_global("foo").is_none());
    }

    #[test]
    fn files_in_directory_groups_by_parent_path() {
        let mut table = SymbolTable::new();
        table.publish(FileIndex::new("pkg/a.go".to_string()));
        table.publish(FileIndex::new("pkg/b.go".to_string()));
        table.publish(FileIndex::new("other/c.go".to_string()));

        assert_eq!(table.files_in_directory("pkg").len(), 2);
        assert_eq!(table.files_in_directory("other").len(), 1);
    }
}
