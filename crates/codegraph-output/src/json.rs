use codegraph_core::store::QueryRow;
use codegraph_index::ParamTypeSnippet;

use crate::{CleanReport, IndexReport, OutputFormatter};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_index(&self, report: &IndexReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_query(&self, rows: &[QueryRow]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_default()
    }

    fn format_param_types(&self, snippets: &[ParamTypeSnippet]) -> String {
        serde_json::to_string_pretty(snippets).unwrap_or_default()
    }

    fn format_clean(&self, report: &CleanReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
