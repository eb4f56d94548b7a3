use std::path::Path;

use codegraph_index::CodeGraph;
use codegraph_output::OutputFormatter;

/// Run `codegraph param-types` — resolve a function's parameter types
/// to their defining source snippets.
///
/// `get_func_param_types` resolves against the in-memory symbol table
/// built by the most recent `index` call on this `CodeGraph`, which a
/// fresh CLI process never has — unlike `query`, the graph store's
/// persisted rows don't carry a definition's parameter list. Re-index
/// first so the command works standalone, the same way `codegraph
/// index && codegraph param-types` would in separate invocations.
pub fn run(formatter: &dyn OutputFormatter, repo_dir: &Path, db_dir: &Path, file: String, line: u32) -> i32 {
    let mut graph = match CodeGraph::open(db_dir, repo_dir, None) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("codegraph param-types: failed to open graph store: {e}");
            return 2;
        }
    };

    if let Err(e) = graph.index(&[], false) {
        eprintln!("codegraph param-types: {e}");
        return 1;
    }

    let snippets = graph.get_func_param_types(&file, line);
    print!("{}", formatter.format_param_types(&snippets));
    0
}
