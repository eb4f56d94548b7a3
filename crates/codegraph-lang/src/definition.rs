//! The extractor's output contract (spec §4.2, §4.3): every definition
//! and raw (unresolved) reference a single file's parse produces.

use codegraph_core::types::{NodeKind, NodeRef};

/// A declared symbol found in one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub kind: NodeKind,
    /// Fully qualified name, e.g. `pkg.mod.Thing.method`.
    pub name: String,
    /// Every unqualified name this definition can be looked up by
    /// within its own file (usually one entry; Python re-exports via
    /// `__all__`/`as` aliasing can add more at the symbol-table layer).
    pub short_names: Vec<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub code: String,
    pub skeleton_code: String,
    /// Parameters, for `Function` definitions only.
    pub params: Vec<Param>,
    /// For a method: the textual type of `self`/`this`/the Go receiver.
    pub receiver_type: Option<String>,
    pub first_return_type: Option<String>,
    /// Fully qualified name of the definition this one is nested in
    /// (a method's `parent_span` is its class), if any.
    pub parent: Option<String>,
}

impl Definition {
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.kind, self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_name: Option<String>,
}

/// What a raw reference is doing syntactically — carried through to
/// resolution because a handful of resolver rules are role-specific
/// (e.g. only `Inherit` references become `EdgeKind::Inherits`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceRole {
    Import,
    Inherit,
    Call,
    Arg,
    Kwarg,
    AssignRhs,
    BinOp,
    Compare,
    TypeRef,
}

/// An as-yet-unresolved name usage. `name_path` is the dotted/attribute
/// chain as written (`["self", "helper"]`, `["pkg", "Client"]`),
/// bounded to 1–3 segments per the tree-sitter query's fixed nesting
/// (spec §9).
#[derive(Debug, Clone, PartialEq)]
pub struct RawReference {
    pub name_path: Vec<String>,
    pub role: ReferenceRole,
    /// Fully qualified name of the definition this reference occurs
    /// inside (or the file's own path, for module-level references).
    pub from: String,
    pub line: u32,
    /// For `Import`: the module path as written, if distinguishable
    /// from `name_path` (e.g. `from pkg.sub import Thing as T`).
    pub import_path: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    pub definitions: Vec<Definition>,
    pub references: Vec<RawReference>,
}
