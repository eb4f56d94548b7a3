//! TypeScript-specific resolution helpers (spec §4.4 "TypeScript/
//! JavaScript" bullet). The extractor already records `import`/`alias`
//! pairs for named, namespace, and default imports (see
//! `queries/typescript.scm`); this module holds the pure classification
//! logic the resolver consults when substituting an alias.

/// The three import binding shapes TS/JS source can introduce, per
/// spec §4.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportBindingKind {
    /// `import { A as B }` — `B` is a local alias for the named export `A`.
    Named,
    /// `import * as N` — `N` is bound to the whole module namespace.
    Namespace,
    /// `import Foo from './mod'` — a single default-export alias.
    Default,
}

/// Classify a binding given the raw captures the extractor produced:
/// a namespace import has no `import_name` (only an alias), a default
/// import has neither a distinguishable source-symbol nor alias
/// besides the local name itself, and a named import has both.
pub fn classify_binding(import_name: Option<&str>, alias: Option<&str>) -> ImportBindingKind {
    match (import_name, alias) {
        (None, Some(_)) => ImportBindingKind::Namespace,
        (Some(name), Some(a)) if name == a => ImportBindingKind::Default,
        _ => ImportBindingKind::Named,
    }
}
