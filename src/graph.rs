//! Dependency graph construction
//!
//! Aggregates scanner and resolver output across the scanned file set into a
//! node set, a flat edge list, and the per-source detailed index used by the
//! inspection view. Rebuilt wholesale on every scan; never patched in place.

use crate::resolver::resolve;
use crate::scanner::ImportScanner;
use crate::types::{
    node_radius, DependencyGraph, FileRecord, GraphEdge, GraphNode, ResolvedDependency,
};

/// Build the dependency graph for one scanned repository
///
/// `contents` is parallel to `files`; entries beyond the analyzed prefix or
/// whose fetch failed are `None`. Such files still become nodes, they just
/// contribute no outgoing edges. Repeated edges between the same file pair
/// are kept: each distinct import statement is one edge and one detailed
/// entry.
pub fn build_graph(
    files: &[FileRecord],
    contents: &[Option<String>],
    scanner: &ImportScanner,
) -> DependencyGraph {
    let nodes = files
        .iter()
        .enumerate()
        .map(|(index, file)| GraphNode {
            index,
            name: file.name.clone(),
            path: file.path.clone(),
            language: file.language,
            color: file.language.color().to_string(),
            radius: node_radius(file.size),
        })
        .collect();

    let mut edges = Vec::new();
    let mut detailed: Vec<Vec<ResolvedDependency>> = vec![Vec::new(); files.len()];

    for (source, file) in files.iter().enumerate() {
        let Some(content) = contents.get(source).and_then(Option::as_ref) else {
            continue;
        };
        for raw in scanner.scan(content, &file.path) {
            let Some(target) = resolve(&raw, files) else {
                tracing::debug!(
                    source = %file.path,
                    target = %raw.target,
                    "import did not resolve to a scanned file"
                );
                continue;
            };
            edges.push(GraphEdge { source, target });
            detailed[source].push(ResolvedDependency {
                source,
                target,
                statement: raw.statement,
                names: raw.names,
                line: raw.line,
                target_path: files[target].path.clone(),
            });
        }
    }

    tracing::info!(
        nodes = files.len(),
        edges = edges.len(),
        "built dependency graph"
    );

    DependencyGraph {
        nodes,
        edges,
        detailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn file(path: &str) -> FileRecord {
        FileRecord {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            size: 256,
            language: Language::from_path(path).unwrap(),
        }
    }

    fn build(files: &[FileRecord], contents: &[Option<String>]) -> DependencyGraph {
        build_graph(files, contents, &ImportScanner::new())
    }

    #[test]
    fn test_single_resolved_dependency() {
        let files = vec![file("a.js"), file("components/Button.js")];
        let contents = vec![
            Some("import { Button } from './components/Button';\n".to_string()),
            Some("export const Button = 1;\n".to_string()),
        ];
        let graph = build(&files, &contents);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0], GraphEdge { source: 0, target: 1 });

        let deps = graph.dependencies_of(0);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].names, vec!["Button"]);
        assert_eq!(deps[0].target_path, "components/Button.js");
    }

    #[test]
    fn test_missing_content_still_a_node() {
        let files = vec![file("a.js"), file("b.js")];
        let contents = vec![None, Some("import { A } from './a';\n".to_string())];
        let graph = build(&files, &contents);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.dependencies_of(0).is_empty());
        assert_eq!(graph.dependencies_of(1).len(), 1);
    }

    #[test]
    fn test_parallel_edges_not_deduplicated() {
        let files = vec![file("a.js"), file("b.js")];
        let contents = vec![
            Some("import { X } from './b';\nimport { Y } from './b';\n".to_string()),
            Some(String::new()),
        ];
        let graph = build(&files, &contents);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.dependencies_of(0).len(), 2);
    }

    #[test]
    fn test_detailed_index_matches_edge_list() {
        let files = vec![file("a.js"), file("b.js"), file("c.js")];
        let contents = vec![
            Some("import { B } from './b';\nimport { C } from './c';\n".to_string()),
            Some("import { C } from './c';\n".to_string()),
            Some(String::new()),
        ];
        let graph = build(&files, &contents);

        for (index, deps) in graph.detailed.iter().enumerate() {
            let edge_count = graph.edges.iter().filter(|e| e.source == index).count();
            assert_eq!(deps.len(), edge_count);
            assert!(deps.iter().all(|d| d.source == index));
        }
    }

    #[test]
    fn test_unresolved_imports_produce_no_edges() {
        let files = vec![file("a.js")];
        let contents = vec![Some("import { X } from './gone';\n".to_string())];
        let graph = build(&files, &contents);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_node_carries_color_and_radius() {
        let files = vec![file("main.py")];
        let graph = build(&files, &[None]);
        assert_eq!(graph.nodes[0].color, "#3572a5");
        assert!(graph.nodes[0].radius >= 6.0);
    }

    #[test]
    fn test_python_scenario() {
        let files = vec![file("main.py"), file("utils.py")];
        let contents = vec![
            Some("from .utils import helper\nimport os\n".to_string()),
            Some("def helper():\n    pass\n".to_string()),
        ];
        let graph = build(&files, &contents);

        assert_eq!(graph.edge_count(), 1);
        let deps = graph.dependencies_of(0);
        assert_eq!(deps[0].target, 1);
        assert_eq!(deps[0].names, vec!["helper"]);
    }
}
