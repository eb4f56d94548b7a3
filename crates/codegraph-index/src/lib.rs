//! Symbol table, resolver, graph assembler, and the indexing pipeline
//! (spec §2 items 3-6). This crate owns the two-pass repo-wide linking
//! step; per-file extraction lives in `codegraph-lang`, and storage
//! lives in `codegraph-core`.

pub mod assembler;
pub mod codegraph;
pub mod func_param_types;
pub mod parser_api;
pub mod pipeline;
pub mod resolver;
pub mod symbol_table;

pub use codegraph::CodeGraph;
pub use func_param_types::{get_func_param_types, ParamTypeSnippet};
pub use parser_api::Parser;
pub use pipeline::CancellationToken;
