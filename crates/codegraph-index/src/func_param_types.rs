//! `CodeGraph.getFuncParamTypes` (spec §6): given a function whose span
//! covers `line`, return the source snippet of each parameter's
//! resolved type definition.

use std::collections::HashSet;

use codegraph_core::types::NodeKind;
use serde::Serialize;

use crate::symbol_table::SymbolTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamTypeSnippet {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub content: String,
}

/// Looks up the function in `file_path` whose line span covers `line`,
/// then resolves each of its parameters' declared type to a concrete
/// definition (file-local first, then repo-global unique), returning
/// one snippet per distinct resolved type. Parameters whose type can't
/// be resolved are silently skipped (best-effort, per spec §9).
pub fn get_func_param_types(table: &SymbolTable, file_path: &str, line: u32) -> Vec<ParamTypeSnippet> {
    let Some(file) = table.file(file_path) else { return Vec::new() };
    let Some(func) = file
        .definitions
        .iter()
        .find(|d| d.kind == NodeKind::Function && line >= d.start_line && line <= d.end_line)
    else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for param in &func.params {
        let Some(type_name) = &param.type_name else { continue };
        let clean = type_name.trim_start_matches('*').trim_start_matches("...").trim().to_string();
        if clean.is_empty() || !seen.insert(clean.clone()) {
            continue;
        }

        let resolved = file.lookup(&clean).or_else(|| table.unique_global(&clean));
        if let Some(def) = resolved {
            let path = def.name.split('#').next().unwrap_or(file_path).to_string();
            out.push(ParamTypeSnippet {
                path,
                start_line: def.start_line,
                end_line: def.end_line,
                content: def.code.clone(),
            });
        }
    }
    out
}
