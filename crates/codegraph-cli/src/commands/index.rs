use std::path::{Path, PathBuf};

use codegraph_core::config::Config;
use codegraph_index::CodeGraph;
use codegraph_output::{IndexReport, OutputFormatter};

/// Run `codegraph index` — walk, parse, and upsert the repository (or
/// the named `paths`, if `incremental`) into the graph store.
pub fn run(
    formatter: &dyn OutputFormatter,
    repo_dir: &Path,
    db_dir: &Path,
    paths: Vec<String>,
    incremental: bool,
) -> i32 {
    let config = match Config::load(repo_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("codegraph index: failed to load config: {e}");
            return 2;
        }
    };

    let mut graph = match CodeGraph::open(db_dir, repo_dir, Some(config)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("codegraph index: failed to open graph store: {e}");
            return 2;
        }
    };

    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    let files_visited = match graph.index(&paths, incremental) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("codegraph index: {e}");
            return 1;
        }
    };

    let node_count = count_rows(&graph, "SELECT COUNT(*) FROM nodes");
    let edge_count = count_rows(&graph, "SELECT COUNT(*) FROM edges");

    print!("{}", formatter.format_index(&IndexReport { files_visited, node_count, edge_count }));
    0
}

fn count_rows(graph: &CodeGraph, sql: &str) -> i64 {
    graph
        .query(sql)
        .ok()
        .and_then(|rows| rows.first().and_then(|row| row.first().and_then(|v| v.as_i64())))
        .unwrap_or(0)
}
