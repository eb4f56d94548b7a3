use std::path::Path;

use codegraph_index::CodeGraph;
use codegraph_output::OutputFormatter;

/// Run `codegraph query` — run a raw SQL query against the graph store.
pub fn run(formatter: &dyn OutputFormatter, repo_dir: &Path, db_dir: &Path, sql: String) -> i32 {
    let graph = match CodeGraph::open(db_dir, repo_dir, None) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("codegraph query: failed to open graph store: {e}");
            return 2;
        }
    };

    match graph.query(&sql) {
        Ok(rows) => {
            print!("{}", formatter.format_query(&rows));
            0
        }
        Err(e) => {
            eprintln!("codegraph query: {e}");
            1
        }
    }
}
