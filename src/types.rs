//! Core data model for the dependency-graph engine
//!
//! All records are rebuilt wholesale on each repository scan and discarded on
//! reset; nothing here is persisted across sessions. Files are identified by
//! their index in scan order, which is stable for the lifetime of one scan.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// One file discovered during the repository scan
///
/// Immutable once scanned. Identified externally by its index in the scan
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Bare filename, e.g. `Button.js`
    pub name: String,
    /// Repository-relative path, unique within the scan
    pub path: String,
    /// Size in bytes as reported by the remote listing
    pub size: u64,
    /// Extension-derived language tag
    pub language: Language,
}

/// An unresolved import/require statement extracted from one file's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImport {
    /// The matched statement text, as it appears in the source
    pub statement: String,
    /// Raw imported name tokens, in statement order
    pub names: Vec<String>,
    /// The path string the statement refers to, unresolved
    pub target: String,
    /// 1-based source line of the statement
    pub line: usize,
}

/// A raw import successfully matched to a sibling file in the same scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Index of the importing file
    pub source: usize,
    /// Index of the file the import resolved to
    pub target: usize,
    /// The original statement text
    pub statement: String,
    /// Raw imported name tokens from the statement
    pub names: Vec<String>,
    /// 1-based source line of the statement
    pub line: usize,
    /// Repository-relative path of the resolved target file
    pub target_path: String,
}

/// A node in the rendered dependency graph, one per scanned file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Index of the backing [`FileRecord`]
    pub index: usize,
    pub name: String,
    pub path: String,
    pub language: Language,
    /// Fixed display color for this node's language
    pub color: String,
    /// Display radius derived from the file's byte size
    pub radius: f32,
}

/// A directed edge between two file indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
}

/// The full dependency graph for one scanned repository
///
/// `detailed[i]` holds exactly the [`ResolvedDependency`] records whose
/// `source` equals `i`, in extraction order. Parallel edges between the same
/// file pair are preserved: the inspection view must show every distinct
/// import statement, not just distinct file pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Per-source ordered dependency lists, parallel to `nodes`
    pub detailed: Vec<Vec<ResolvedDependency>>,
}

impl DependencyGraph {
    /// Ordered resolved dependencies for one source file
    pub fn dependencies_of(&self, index: usize) -> &[ResolvedDependency] {
        self.detailed.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// A later textual appearance of an imported symbol inside its importing file
///
/// Ephemeral: recomputed each time a file is inspected, never stored in the
/// graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageOccurrence {
    /// 1-based line number of the occurrence
    pub line: usize,
    /// 0-based byte column of the match start within the line
    pub column: usize,
    /// Canonical symbol name that matched
    pub symbol: String,
    /// The full line text, trimmed, for display context
    pub line_text: String,
}

/// The result of inspecting a single file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInspection {
    /// Raw file text
    pub text: String,
    pub line_count: usize,
    pub byte_size: usize,
    /// Resolved dependencies of this file, in extraction order
    pub dependencies: Vec<ResolvedDependency>,
}

/// Display radius for a node, derived from file size
///
/// Clamped so that empty files stay visible and huge files do not dominate
/// the layout.
pub fn node_radius(size: u64) -> f32 {
    (size as f32 / 500.0).clamp(6.0, 24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_radius_clamps() {
        assert_eq!(node_radius(0), 6.0);
        assert_eq!(node_radius(100), 6.0);
        assert_eq!(node_radius(5_000), 10.0);
        assert_eq!(node_radius(1_000_000), 24.0);
    }

    #[test]
    fn test_dependencies_of_out_of_range() {
        let graph = DependencyGraph::default();
        assert!(graph.dependencies_of(7).is_empty());
    }

    #[test]
    fn test_graph_serializes_to_json() {
        let graph = DependencyGraph {
            nodes: vec![GraphNode {
                index: 0,
                name: "a.js".to_string(),
                path: "a.js".to_string(),
                language: Language::JavaScript,
                color: Language::JavaScript.color().to_string(),
                radius: node_radius(1200),
            }],
            edges: vec![],
            detailed: vec![vec![]],
        };
        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.contains("\"a.js\""));
        assert!(json.contains("#f1e05a"));
    }
}
