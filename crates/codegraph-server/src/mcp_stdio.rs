//! Stdin/stdout transport for the MCP JSON-RPC handler: one request per
//! line in, one response per line out.

use std::io::{self, BufRead, Write};

use crate::mcp;
use crate::SharedCodeGraph;

/// Read JSON-RPC requests from `input` line by line, dispatch each
/// through [`mcp::process_line`], and write responses to `output`.
/// Returns once `input` reaches EOF.
pub fn run(graph: SharedCodeGraph, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let response = mcp::process_line(&graph, &line);
        if response.is_empty() {
            continue;
        }
        writeln!(output, "{response}")?;
        output.flush()?;
    }
    tracing::info!("MCP stdio loop reached EOF");
    Ok(())
}

/// Run the stdio loop against the process's real stdin/stdout.
pub fn serve(graph: SharedCodeGraph) -> io::Result<()> {
    tracing::info!("MCP stdio loop starting");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(graph, stdin.lock(), stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[test]
    fn processes_multiple_lines_and_skips_notifications() {
        let repo = tempdir().unwrap();
        let db = tempdir().unwrap();
        fs::write(repo.path().join("a.py"), "class Thing:\n    pass\n").unwrap();
        let graph = Arc::new(Mutex::new(codegraph_index::CodeGraph::open(db.path(), repo.path(), None).unwrap()));

        let input = "{\"jsonrpc\":\"2.0\",\"method\":\"tools/list\",\"id\":1}\n\n{\"jsonrpc\":\"2.0\",\"method\":\"codegraph/index\",\"params\":{},\"id\":2}\n";
        let mut output = Vec::new();
        run(graph, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<&str> = text.lines().collect();
        assert_eq!(responses.len(), 2);
        assert!(responses[0].contains("\"id\":1"));
        assert!(responses[1].contains("\"files_visited\":1"));
    }
}
