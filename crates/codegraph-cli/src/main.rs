//! codegraph CLI — build and query a typed property graph of a source
//! repository. See `codegraph --help` for usage.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("codegraph=info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let repo_dir = cli
        .repo
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let db_dir = cli.db.map(PathBuf::from).unwrap_or_else(|| repo_dir.join(".codegraph").join("db"));
    tracing::info!(repo = %repo_dir.display(), db = %db_dir.display(), "codegraph starting");

    let formatter: Box<dyn codegraph_output::OutputFormatter> = if cli.json {
        Box::new(codegraph_output::json::JsonFormatter)
    } else {
        Box::new(codegraph_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Index { paths, incremental } => {
            commands::index::run(&*formatter, &repo_dir, &db_dir, paths, incremental)
        }
        Commands::Query { sql } => commands::query::run(&*formatter, &repo_dir, &db_dir, sql),
        Commands::ParamTypes { file, line } => {
            commands::param_types::run(&*formatter, &repo_dir, &db_dir, file, line)
        }
        Commands::Clean { delete_dir } => commands::clean::run(&*formatter, &repo_dir, &db_dir, delete_dir),
        Commands::Serve { mcp, http, port } => commands::serve::run(&repo_dir, &db_dir, mcp, http, port),
    };

    std::process::exit(exit_code);
}
