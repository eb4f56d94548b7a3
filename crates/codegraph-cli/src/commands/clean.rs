use std::path::Path;

use codegraph_index::CodeGraph;
use codegraph_output::{CleanReport, OutputFormatter};

/// Run `codegraph clean` — drop every row from the graph store,
/// optionally removing its directory from disk.
pub fn run(formatter: &dyn OutputFormatter, repo_dir: &Path, db_dir: &Path, delete_dir: bool) -> i32 {
    let mut graph = match CodeGraph::open(db_dir, repo_dir, None) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("codegraph clean: failed to open graph store: {e}");
            return 2;
        }
    };

    match graph.clean(delete_dir) {
        Ok(()) => {
            print!("{}", formatter.format_clean(&CleanReport { deleted_directory: delete_dir }));
            0
        }
        Err(e) => {
            eprintln!("codegraph clean: {e}");
            1
        }
    }
}
