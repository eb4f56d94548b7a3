//! The Resolver (spec §4.4): converts each `RawReference` into a
//! concrete target definition or a deduplicated `Unparsed` placeholder,
//! applying the ordered rules and language-specific scoping, then
//! routes the result through the schema's endpoint-kind validation
//! before handing an `Edge` back to the assembler.

use std::path::Path;

use codegraph_core::types::{Edge, EdgeKind, NodeKind, NodeRef};
use codegraph_lang::{python, registry::LanguageTag, Definition, RawReference, ReferenceRole};

use crate::symbol_table::SymbolTable;

pub struct Resolver<'a> {
    table: &'a SymbolTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Resolve one `RawReference` to a schema-valid `Edge`, or `None`
    /// if the source endpoint's kind can never validly anchor this
    /// edge kind (spec §7 `SchemaViolation`: "if coercion is
    /// impossible ... the edge is dropped with a warning").
    pub fn resolve_to_edge(&self, raw: &RawReference, lang: LanguageTag) -> Option<Edge> {
        let edge_kind = match raw.role {
            ReferenceRole::Import => EdgeKind::Imports,
            ReferenceRole::Inherit => EdgeKind::Inherits,
            _ => EdgeKind::References,
        };

        let from = self.from_ref(&raw.from);

        let (to, import_meta) = if raw.role == ReferenceRole::Import {
            let target = self.resolve_import(raw, lang, &raw.from);
            (target, Some((raw.import_path.clone().unwrap_or_default(), raw.alias.clone().unwrap_or_default())))
        } else {
            let target = self
                .resolve_name_path(&raw.name_path, &raw.from, lang)
                .unwrap_or_else(|| NodeRef::new(NodeKind::Unparsed, raw.name_path.join(".")));
            (target, None)
        };

        let to = if codegraph_core::schema::allowed(edge_kind, from.kind, to.kind) {
            to
        } else {
            let fallback = NodeRef::new(NodeKind::Unparsed, unparsed_name(raw));
            if codegraph_core::schema::allowed(edge_kind, from.kind, NodeKind::Unparsed) {
                fallback
            } else {
                tracing::warn!(
                    edge_kind = edge_kind.as_str(),
                    from_kind = from.kind.as_str(),
                    "dropping edge: source kind cannot anchor this edge kind even when coerced to Unparsed"
                );
                return None;
            }
        };

        let mut edge = Edge::new(edge_kind, from, to);
        if let Some((import, alias)) = import_meta {
            edge = edge.with_import(import, alias);
        }
        Some(edge)
    }

    fn from_ref(&self, from: &str) -> NodeRef {
        if let Some(def) = self.table.definition_by_name(from) {
            return def.node_ref();
        }
        NodeRef::new(NodeKind::File, from.to_string())
    }

    /// Resolver rules 1-5 (spec §4.4), applied in order; returns the
    /// first match.
    fn resolve_name_path(&self, name_path: &[String], from: &str, lang: LanguageTag) -> Option<NodeRef> {
        let file_key = file_of(from);
        let file = self.table.file(file_key)?;

        let effective_path: Vec<String> = if lang == LanguageTag::Python && python::is_self_reference(name_path) {
            name_path[1..].to_vec()
        } else {
            name_path.to_vec()
        };
        if effective_path.is_empty() {
            return None;
        }
        let composite = effective_path.join(".");

        // Rule 1: local lookup, narrowed by further path segments via
        // the composite short-name form (`Owner.Name`, spec §4.2 step 5).
        if let Some(def) = file.lookup(&composite) {
            return Some(def.node_ref());
        }

        // Rule 2: import-alias lookup. A recognised alias whose target
        // can't be pinned to a concrete definition isn't a match in
        // itself — it falls through to rules 3-5 rather than forcing
        // an `Unparsed(source)` short-circuit (spec §8 scenario 3: an
        // unresolved `pkg.Sym` reference becomes `Unparsed(name_path)`,
        // the full dotted chain, not `Unparsed(pkg)`).
        if let Some(target) = file.lookup_alias(&effective_path[0]) {
            if let Some(node) = self.resolve_via_alias(target, &effective_path[1..], file_key, lang) {
                return Some(node);
            }
        }

        // Rule 3: same-package lookup (Go only).
        if lang.has_package_scoping() {
            if let Some(dir) = Path::new(file_key).parent().map(|p| p.to_string_lossy().to_string()) {
                for other in self.table.files_in_directory(&dir) {
                    if other.file_path == file_key {
                        continue;
                    }
                    if let Some(def) = other.lookup(&composite) {
                        return Some(def.node_ref());
                    }
                }
            }
        }

        // Rule 4: repo-global unique lookup.
        if let Some(def) = self.table.unique_global(&composite) {
            return Some(def.node_ref());
        }
        if effective_path.len() > 1 {
            if let Some(def) = self.table.unique_global(effective_path.last().unwrap()) {
                return Some(def.node_ref());
            }
        }

        None
    }

    /// Returns `None` when the alias's source can't be pinned to a
    /// concrete file in the repo (e.g. a stdlib/external package) —
    /// the caller falls through to the remaining resolver rules rather
    /// than treating the bare import source as the match.
    fn resolve_via_alias(
        &self,
        target: &crate::symbol_table::ImportTarget,
        remainder: &[String],
        from_file: &str,
        lang: LanguageTag,
    ) -> Option<NodeRef> {
        let target_file = self.locate_file_for_source(&target.source, from_file, lang)?;
        let Some(tf) = self.table.file(&target_file) else {
            return Some(NodeRef::new(NodeKind::File, target_file));
        };

        let lookup_key = match (&target.symbol, remainder.is_empty()) {
            (Some(symbol), true) => symbol.clone(),
            (Some(symbol), false) => format!("{symbol}.{}", remainder.join(".")),
            (None, false) => remainder.join("."),
            (None, true) => return Some(NodeRef::new(NodeKind::File, target_file)),
        };

        if let Some(def) = tf.lookup(&lookup_key) {
            return Some(def.node_ref());
        }
        if let Some(symbol) = &target.symbol {
            if let Some(def) = tf.lookup(symbol) {
                return Some(def.node_ref());
            }
        }
        Some(NodeRef::new(NodeKind::File, target_file))
    }

    /// Best-effort module-path→file resolution: relative TS/JS
    /// specifiers and dotted Python module paths are checked against
    /// the repo-global file set; anything else (stdlib/external
    /// packages, Go import paths with no go.mod model in scope) is
    /// left unresolved so the caller falls back to Unparsed.
    fn locate_file_for_source(&self, source: &str, from_file: &str, lang: LanguageTag) -> Option<String> {
        match lang {
            LanguageTag::TypeScript | LanguageTag::JavaScript if source.starts_with('.') => {
                let base_dir = Path::new(from_file).parent().unwrap_or_else(|| Path::new(""));
                let joined = base_dir.join(source);
                for ext in [".ts", ".tsx", ".js", ".jsx", ""] {
                    let candidate = normalize(&format!("{}{ext}", joined.to_string_lossy()));
                    if self.table.file(&candidate).is_some() {
                        return Some(candidate);
                    }
                }
                None
            }
            LanguageTag::Python => {
                let as_path = source.replace('.', "/");
                for suffix in [".py", "/__init__.py"] {
                    let candidate = normalize(&format!("{as_path}{suffix}"));
                    if self.table.file(&candidate).is_some() {
                        return Some(candidate);
                    }
                }
                None
            }
            _ => None,
        }
    }
}

fn file_of(from: &str) -> &str {
    from.split('#').next().unwrap_or(from)
}

fn unparsed_name(raw: &RawReference) -> String {
    if raw.role == ReferenceRole::Import {
        raw.import_path.clone().unwrap_or_else(|| raw.name_path.join("."))
    } else {
        raw.name_path.join(".")
    }
}

fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Import-edge resolution (spec §4.4 "Edge emission"): an import
/// produces an `Imports` edge whose target is the source file
/// (unqualified namespace-style import), the specific definition it
/// names, or `Unparsed` if the source cannot be located on disk.
impl Resolver<'_> {
    fn resolve_import(&self, raw: &RawReference, lang: LanguageTag, from: &str) -> NodeRef {
        let file_key = file_of(from);
        let source = raw.import_path.clone().unwrap_or_default();
        let Some(target_file) = self.locate_file_for_source(&source, file_key, lang) else {
            return NodeRef::new(NodeKind::Unparsed, source);
        };
        let Some(tf) = self.table.file(&target_file) else {
            return NodeRef::new(NodeKind::File, target_file);
        };
        let imported_symbol = raw.name_path.first().map(|s| s.as_str()).filter(|s| *s != source);
        if let Some(symbol) = imported_symbol {
            if let Some(def) = tf.lookup(symbol) {
                return def.node_ref();
            }
        }
        NodeRef::new(NodeKind::File, target_file)
    }
}
