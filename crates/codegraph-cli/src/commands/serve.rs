use std::path::Path;

use codegraph_server::CodegraphServer;

/// Run `codegraph serve` — start the MCP (stdio) and/or HTTP transport
/// shells over a shared graph store.
pub fn run(repo_dir: &Path, db_dir: &Path, mcp: bool, http: bool, port: u16) -> i32 {
    if !mcp && !http {
        eprintln!("codegraph serve: at least one of --mcp or --http required");
        return 2;
    }

    let server = match CodegraphServer::open(db_dir, repo_dir.to_path_buf(), None) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("codegraph serve: failed to open graph store: {e}");
            return 2;
        }
    };

    // MCP-only runs synchronously over stdio — no tokio runtime needed.
    if mcp && !http {
        if let Err(e) = codegraph_server::mcp_stdio::serve(server.graph) {
            eprintln!("codegraph serve: MCP error: {e}");
            return 2;
        }
        return 0;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("codegraph serve: failed to create runtime: {e}");
            return 2;
        }
    };

    rt.block_on(async {
        if mcp {
            let graph = server.graph.clone();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = codegraph_server::mcp_stdio::serve(graph) {
                    eprintln!("codegraph serve: MCP error: {e}");
                }
            });
        }

        eprintln!("codegraph serve: HTTP on http://127.0.0.1:{port}");
        if let Err(e) = codegraph_server::http::serve(server.graph, port).await {
            eprintln!("codegraph serve: HTTP error: {e}");
            return 2;
        }
        0
    })
}
