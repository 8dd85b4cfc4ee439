/// End-to-end tests for the scan -> graph -> inspect -> highlight flow
/// using an in-memory content provider.
use std::collections::HashMap;

use repograph::config::Config;
use repograph::error::{Error, Result};
use repograph::remote::{ContentProvider, EntryKind, RemoteEntry, RepoLocator};
use repograph::session::Session;

/// In-memory repository: directory listings plus file bodies
struct FakeRepo {
    listings: HashMap<String, Vec<RemoteEntry>>,
    contents: HashMap<String, String>,
    unavailable: Vec<String>,
}

impl FakeRepo {
    fn new() -> Self {
        Self {
            listings: HashMap::new(),
            contents: HashMap::new(),
            unavailable: Vec::new(),
        }
    }

    fn add_file(&mut self, path: &str, content: &str) {
        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (String::new(), path.to_string()),
        };
        // Register intermediate directories up the chain
        let mut current = dir.clone();
        loop {
            let (parent, dir_name) = match current.rsplit_once('/') {
                Some((parent, dir_name)) => (parent.to_string(), dir_name.to_string()),
                None if current.is_empty() => break,
                None => (String::new(), current.clone()),
            };
            let listing = self.listings.entry(parent.clone()).or_default();
            if !listing.iter().any(|e| e.path == current) {
                listing.push(RemoteEntry {
                    name: dir_name,
                    path: current.clone(),
                    kind: EntryKind::Dir,
                    size: 0,
                    download_url: None,
                });
            }
            current = parent;
        }
        self.listings
            .entry(dir)
            .or_default()
            .push(RemoteEntry {
                name,
                path: path.to_string(),
                kind: EntryKind::File,
                size: content.len() as u64,
                download_url: None,
            });
        self.contents.insert(path.to_string(), content.to_string());
    }

    fn mark_unavailable(&mut self, path: &str) {
        self.unavailable.push(path.to_string());
    }
}

#[async_trait::async_trait]
impl ContentProvider for FakeRepo {
    async fn list_directory(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<Vec<RemoteEntry>> {
        Ok(self.listings.get(path).cloned().unwrap_or_default())
    }

    async fn read_file(&self, _owner: &str, _repo: &str, path: &str) -> Result<Option<String>> {
        if self.unavailable.iter().any(|p| p == path) {
            return Ok(None);
        }
        Ok(self.contents.get(path).cloned())
    }
}

fn locator() -> RepoLocator {
    RepoLocator::parse("github.com/acme/webapp").unwrap()
}

#[tokio::test]
async fn test_full_scan_inspect_highlight_flow() {
    let mut repo = FakeRepo::new();
    repo.add_file(
        "src/App.jsx",
        "import { Button } from './components/Button';\n\
         import { Nav } from './components/Nav';\n\
         export const App = () => Nav(Button());\n",
    );
    repo.add_file("src/components/Button.jsx", "export const Button = 1;\n");
    repo.add_file("src/components/Nav.jsx", "export const Nav = 1;\n");

    let mut session = Session::new(repo, Config::default());
    let graph = session.scan_and_build_graph(locator()).await.unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let app_index = session
        .files()
        .iter()
        .position(|f| f.path == "src/App.jsx")
        .unwrap();
    let inspection = session.inspect_file(app_index).await.unwrap();
    assert_eq!(inspection.dependencies.len(), 2);
    assert_eq!(inspection.line_count, 3);

    // Highlight the raw text as trivially rendered markup
    let annotated = session
        .locate_and_highlight(app_index, &inspection.text)
        .unwrap();
    // Both usages on line 3 get markers; the import lines stay bare
    assert_eq!(annotated.matches("data-dep").count(), 2);
    assert!(annotated.contains(">Button</span>"));
    assert!(annotated.contains(">Nav</span>"));

    // Navigate from the first dependency back to its node
    let dep = inspection.dependencies[0].clone();
    let target = session.resolve_navigation_target(&dep).unwrap();
    assert_eq!(session.files()[target].path, "src/components/Button.jsx");
}

#[tokio::test]
async fn test_one_unavailable_file_among_many() {
    let mut repo = FakeRepo::new();
    for i in 0..50 {
        repo.add_file(&format!("m{i}.js"), &format!("import {{ next }} from './m{}';\n", i + 1));
    }
    repo.mark_unavailable("m49.js");

    let mut session = Session::new(repo, Config::default());
    let graph = session.scan_and_build_graph(locator()).await.unwrap();

    assert_eq!(graph.node_count(), 50);
    // 48 files resolve a next-module edge (m48 -> m49); m49 contributes none
    assert!(graph.dependencies_of(49).is_empty());
    let contributing = graph
        .detailed
        .iter()
        .filter(|deps| !deps.is_empty())
        .count();
    assert_eq!(contributing, 49);
}

#[tokio::test]
async fn test_duplicate_symbol_owned_by_first_dependency() {
    let mut repo = FakeRepo::new();
    repo.add_file(
        "view.js",
        "import { Item } from './widgets/Item';\n\
         import { Item } from './list/Item';\n\
         const row = Item();\n",
    );
    repo.add_file("widgets/Item.js", "export const Item = 1;\n");
    repo.add_file("list/Item.js", "export const Item = 2;\n");

    let mut session = Session::new(repo, Config::default());
    session.scan_and_build_graph(locator()).await.unwrap();

    let view = session
        .files()
        .iter()
        .position(|f| f.path == "view.js")
        .unwrap();
    let inspection = session.inspect_file(view).await.unwrap();
    let annotated = session
        .locate_and_highlight(view, &inspection.text)
        .unwrap();

    // `Item` belongs to the first-seen dependency; the later duplicate is
    // dropped before matching
    let first_target = inspection.dependencies[0].target;
    let second_target = inspection.dependencies[1].target;
    assert_eq!(annotated.matches("data-dep").count(), 1);
    assert!(annotated.contains(&format!("data-dep=\"{first_target}\"")));
    assert!(!annotated.contains(&format!("data-dep=\"{second_target}\"")));
}

#[tokio::test]
async fn test_empty_repository_is_no_supported_files() {
    let repo = FakeRepo::new();
    let mut session = Session::new(repo, Config::default());
    let err = session.scan_and_build_graph(locator()).await.unwrap_err();
    assert!(matches!(err, Error::NoSupportedFiles));
}

#[tokio::test]
async fn test_python_package_scan() {
    let mut repo = FakeRepo::new();
    repo.add_file("pkg/main.py", "from .utils import helper\nimport os\n\nhelper()\n");
    repo.add_file("pkg/utils.py", "def helper():\n    pass\n");

    let mut session = Session::new(repo, Config::default());
    let graph = session.scan_and_build_graph(locator()).await.unwrap();

    // `import os` is skipped: not an intra-package import
    assert_eq!(graph.edge_count(), 1);

    let main = session
        .files()
        .iter()
        .position(|f| f.path == "pkg/main.py")
        .unwrap();
    let occurrences = session.usage_occurrences(main).unwrap();
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].symbol, "helper");
    assert_eq!(occurrences[0].line, 4);
}

#[tokio::test]
async fn test_rescan_replaces_graph_wholesale() {
    let mut repo = FakeRepo::new();
    repo.add_file("a.js", "import { B } from './b';\n");
    repo.add_file("b.js", "export const B = 1;\n");

    let mut session = Session::new(repo, Config::default());
    session.scan_and_build_graph(locator()).await.unwrap();
    assert_eq!(session.graph().unwrap().node_count(), 2);

    let other = RepoLocator::parse("github.com/acme/other").unwrap();
    // Same provider, new scan: state is rebuilt, not merged
    session.scan_and_build_graph(other).await.unwrap();
    assert_eq!(session.graph().unwrap().node_count(), 2);
    assert_eq!(session.repo().unwrap().repo, "other");
}
