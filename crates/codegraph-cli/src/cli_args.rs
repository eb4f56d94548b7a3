use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codegraph", version, about = "Code-graph indexer for source repositories")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Repository root (default: current directory)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Graph store directory (default: <repo>/.codegraph/db)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Walk, parse, and index the repository into the graph store
    Index {
        /// Files to re-parse (empty = full re-walk of the repository)
        paths: Vec<String>,
        /// Reuse the existing symbol table, touching only `paths`
        #[arg(long)]
        incremental: bool,
    },

    /// Run a raw SQL query against the graph store
    Query {
        /// SQL to run against the `nodes`/`edges` tables
        sql: String,
    },

    /// Resolve the source snippets of a function's parameter types
    ParamTypes {
        /// File path containing the function, relative to the repository root
        file: String,
        /// Line number within the function's body or signature
        line: u32,
    },

    /// Drop every row from the graph store
    Clean {
        /// Also remove the store's directory from disk
        #[arg(long)]
        delete_dir: bool,
    },

    /// Run the MCP (stdio) and/or HTTP transport shells
    Serve {
        /// MCP over stdio
        #[arg(long)]
        mcp: bool,
        /// HTTP API
        #[arg(long)]
        http: bool,
        /// HTTP port (default: 7420)
        #[arg(long, default_value = "7420")]
        port: u16,
    },
}
