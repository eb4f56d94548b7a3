use codegraph_core::store::QueryRow;
use codegraph_index::ParamTypeSnippet;

use crate::{CleanReport, IndexReport, OutputFormatter};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_index(&self, report: &IndexReport) -> String {
        format!(
            "indexed {} file(s): {} node(s), {} edge(s)\n",
            report.files_visited, report.node_count, report.edge_count,
        )
    }

    fn format_query(&self, rows: &[QueryRow]) -> String {
        if rows.is_empty() {
            return "(no rows)\n".to_string();
        }
        let mut out = String::new();
        for row in rows {
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn format_param_types(&self, snippets: &[ParamTypeSnippet]) -> String {
        if snippets.is_empty() {
            return "(no resolvable parameter types)\n".to_string();
        }
        let mut out = String::new();
        for s in snippets {
            out.push_str(&format!("{}:{}-{}\n{}\n\n", s.path, s.start_line, s.end_line, s.content));
        }
        out
    }

    fn format_clean(&self, report: &CleanReport) -> String {
        if report.deleted_directory {
            "graph store cleared and database directory removed\n".to_string()
        } else {
            "graph store cleared\n".to_string()
        }
    }
}

fn render_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
