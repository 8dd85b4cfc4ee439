use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use repograph::config::Config;
use repograph::remote::{GitHubProvider, RepoLocator};
use repograph::session::Session;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Scan a remote repository and print its file-dependency graph
#[derive(Parser, Debug)]
#[command(name = "repograph", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// Repository URL or `host/owner/repo` string
    url: String,

    /// Print the full graph as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Also inspect one file by repository-relative path
    #[arg(long, value_name = "PATH")]
    inspect: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bearer token for the content host
    #[arg(long, env = "REPOGRAPH_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(token) = cli.token {
        config.remote.token = Some(token);
    }

    let locator = RepoLocator::parse(&cli.url)?;
    let provider = GitHubProvider::new(&config.remote)?;
    let mut session = Session::new(provider, config);

    let graph = session.scan_and_build_graph(locator).await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(graph)?);
    } else {
        println!(
            "{} files, {} resolved dependencies",
            graph.node_count(),
            graph.edge_count()
        );
        for node in &graph.nodes {
            let deps = graph.dependencies_of(node.index);
            if deps.is_empty() {
                continue;
            }
            println!("{} ({})", node.path, node.language.tag());
            for dep in deps {
                println!("  line {:>4}  -> {}", dep.line, dep.target_path);
            }
        }
    }

    if let Some(path) = cli.inspect {
        let index = session
            .files()
            .iter()
            .position(|f| f.path == path)
            .with_context(|| format!("no scanned file at path '{path}'"))?;
        let inspection = session.inspect_file(index).await?;
        println!(
            "\n{path}: {} lines, {} bytes, {} dependencies",
            inspection.line_count,
            inspection.byte_size,
            inspection.dependencies.len()
        );
        for occurrence in session.usage_occurrences(index)? {
            println!(
                "  {}:{}  {}  | {}",
                occurrence.line, occurrence.column, occurrence.symbol, occurrence.line_text
            );
        }
    }

    Ok(())
}
