//! Declarative per-language tree-sitter queries (spec §4.1).
//!
//! Each language contributes one `.scm` source combining its
//! definition query and its reference query; captures are named
//! `@definition.<kind>[.<field>]` and `@reference.<role>[.<field>]`
//! per spec §4.1/§4.2. Reference capture paths are limited to 1-3
//! segments (`@reference.*.path1/.path2/.path3`) because tree-sitter
//! queries cannot recurse over an attribute chain of unbounded depth
//! (spec §9) — the `.scm` files spell out the bounded alternatives
//! literally rather than attempting a recursive pattern.

use tree_sitter::{Language, Query, QueryError};

pub const PYTHON_QUERY: &str = include_str!("python.scm");
pub const GO_QUERY: &str = include_str!("go.scm");
pub const TYPESCRIPT_QUERY: &str = include_str!("typescript.scm");
pub const JAVASCRIPT_QUERY: &str = include_str!("javascript.scm");

/// Compile the combined definition+reference query for a language tag.
pub fn query_for(lang: &Language, tag: &str) -> Result<Query, QueryError> {
    let source = match tag {
        "python" => PYTHON_QUERY,
        "go" => GO_QUERY,
        "typescript" | "tsx" => TYPESCRIPT_QUERY,
        "javascript" => JAVASCRIPT_QUERY,
        _ => "",
    };
    Query::new(lang, source)
}
