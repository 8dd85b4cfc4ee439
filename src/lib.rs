//! # repograph - Repository Dependency Graph Extraction
//!
//! Builds an interactive map of a repository's internal file-dependency
//! structure, fetched on demand from a remote code host. The engine scans the
//! repository tree, extracts import/require statements with per-language
//! lexical patterns, resolves each import to a sibling file by path-matching
//! heuristics, and maps imported symbols back onto their textual usage
//! occurrences for cross-reference highlighting.
//!
//! ## Overview
//!
//! Everything degrades gracefully on malformed or partial input: unsupported
//! languages yield no imports, unmatched statements are skipped, and a file
//! whose content cannot be fetched stays in the graph as an edgeless node.
//! There is deliberately no language parsing here - extraction is lexical,
//! resolution is heuristic, and both are rebuilt wholesale per scan.
//!
//! ## Architecture
//!
//! ```text
//! repository scan ──> import scanner (per file)
//!                         │
//!                         ▼
//!                     path resolver (per import)
//!                         │
//!                         ▼
//!                     graph builder ──> DependencyGraph
//!                                           │ inspect
//!                                           ▼
//!                     usage locator ──> cross-reference highlighter
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use repograph::config::Config;
//! use repograph::remote::{GitHubProvider, RepoLocator};
//! use repograph::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let provider = GitHubProvider::new(&config.remote)?;
//!     let mut session = Session::new(provider, config);
//!
//!     let locator = RepoLocator::parse("https://github.com/octocat/hello-world")?;
//!     let graph = session.scan_and_build_graph(locator).await?;
//!     println!("{} files, {} dependencies", graph.node_count(), graph.edge_count());
//!     Ok(())
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Dependency graph construction from scanner and resolver output
pub mod graph;

/// Cross-reference highlighting over rendered markup
pub mod highlight;

/// Language classification from file extensions
pub mod language;

/// Remote repository content access (trait + GitHub provider)
pub mod remote;

/// Heuristic import-path resolution against the scanned file set
pub mod resolver;

/// Import extraction via per-language lexical patterns
pub mod scanner;

/// Session-scoped orchestration of scan, inspect, and highlight
pub mod session;

/// Core data model: files, imports, dependencies, graph, occurrences
pub mod types;

/// Symbol usage location inside importing files
pub mod usage;
