//! Session-scoped orchestration
//!
//! A [`Session`] owns all state for one scanned repository: the file list,
//! fetched contents, and the dependency graph. Everything is rebuilt
//! wholesale by [`Session::scan_and_build_graph`] and discarded by
//! [`Session::reset`]; a failed scan leaves the previous state untouched so
//! the caller never sees a half-built graph.

use futures::future::{join_all, BoxFuture, FutureExt};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::highlight::Highlighter;
use crate::language::Language;
use crate::remote::{ContentProvider, EntryKind, RepoLocator};
use crate::scanner::ImportScanner;
use crate::types::{
    DependencyGraph, FileInspection, FileRecord, ResolvedDependency, UsageOccurrence,
};
use crate::usage::UsageLocator;

/// Conventional dependency cache directory, pruned from recursion
const PRUNED_DIR: &str = "node_modules";

/// State of the "inspect a file" flow
///
/// `Failed` is sticky: only an explicit retry (another `inspect_file` call)
/// re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectState {
    Closed,
    Loading(usize),
    Ready(usize),
    Failed(usize),
}

/// One interactive repository session
pub struct Session<P: ContentProvider> {
    provider: P,
    config: Config,
    scanner: ImportScanner,
    locator: Option<RepoLocator>,
    files: Vec<FileRecord>,
    contents: Vec<Option<String>>,
    graph: Option<DependencyGraph>,
    inspect_state: InspectState,
}

impl<P: ContentProvider> Session<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self {
            provider,
            config,
            scanner: ImportScanner::new(),
            locator: None,
            files: Vec::new(),
            contents: Vec::new(),
            graph: None,
            inspect_state: InspectState::Closed,
        }
    }

    /// Discard all state from the current scan
    pub fn reset(&mut self) {
        self.locator = None;
        self.files.clear();
        self.contents.clear();
        self.graph = None;
        self.inspect_state = InspectState::Closed;
    }

    /// Scan a repository and build its dependency graph
    ///
    /// Fails with [`Error::NoSupportedFiles`] when nothing matched the
    /// supported extension set, and propagates [`Error::Remote`] from
    /// directory listings. Session state is replaced only on success.
    pub async fn scan_and_build_graph(
        &mut self,
        locator: RepoLocator,
    ) -> Result<&DependencyGraph> {
        tracing::info!(repo = %locator, "scanning repository");

        let mut files = Vec::new();
        self.visit_directory(&locator, "", &mut files).await?;
        if files.is_empty() {
            return Err(Error::NoSupportedFiles);
        }

        // Content is fetched only for a prefix of the scan order; the
        // fetches run concurrently with no ordering guarantee among them.
        let analyzed = files.len().min(self.config.scan.max_analyzed);
        let fetches = files[..analyzed].iter().map(|file| {
            self.provider
                .read_file(&locator.owner, &locator.repo, &file.path)
        });
        let mut contents: Vec<Option<String>> = Vec::with_capacity(files.len());
        for (file, result) in files[..analyzed].iter().zip(join_all(fetches).await) {
            match result {
                Ok(content) => contents.push(content),
                Err(error) => {
                    tracing::warn!(path = %file.path, %error, "content fetch failed");
                    contents.push(None);
                }
            }
        }
        contents.resize(files.len(), None);

        let graph = build_graph(&files, &contents, &self.scanner);

        self.locator = Some(locator);
        self.files = files;
        self.contents = contents;
        self.inspect_state = InspectState::Closed;
        Ok(&*self.graph.insert(graph))
    }

    /// Depth-first recursive listing, bounded by the file cap
    ///
    /// Dot-directories and the dependency cache directory are pruned
    /// entirely; files with unsupported extensions are never collected.
    fn visit_directory<'a>(
        &'a self,
        locator: &'a RepoLocator,
        path: &'a str,
        files: &'a mut Vec<FileRecord>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            if files.len() >= self.config.scan.max_files {
                return Ok(());
            }
            let entries = self
                .provider
                .list_directory(&locator.owner, &locator.repo, path)
                .await?;
            for entry in entries {
                if files.len() >= self.config.scan.max_files {
                    break;
                }
                match entry.kind {
                    EntryKind::File => {
                        if let Some(language) = Language::from_path(&entry.path) {
                            files.push(FileRecord {
                                name: entry.name,
                                path: entry.path,
                                size: entry.size,
                                language,
                            });
                        }
                    }
                    EntryKind::Dir => {
                        if entry.name.starts_with('.') || entry.name == PRUNED_DIR {
                            tracing::debug!(dir = %entry.path, "pruned directory");
                            continue;
                        }
                        self.visit_directory(locator, &entry.path, files).await?;
                    }
                }
            }
            Ok(())
        }
        .boxed()
    }

    /// Inspect one file: its text plus its ordered resolved dependencies
    ///
    /// Drives the inspect state machine: `Loading` on entry, `Ready` on
    /// success, `Failed` when the content is unavailable. The rest of the
    /// graph stays valid either way.
    pub async fn inspect_file(&mut self, index: usize) -> Result<FileInspection> {
        let locator = self.locator.clone().ok_or(Error::NoActiveScan)?;
        let file = self
            .files
            .get(index)
            .ok_or(Error::UnknownFile(index))?
            .clone();
        self.inspect_state = InspectState::Loading(index);

        let cached = self.contents.get(index).cloned().flatten();
        let content = match cached {
            Some(content) => Some(content),
            None => {
                let fetched = self
                    .provider
                    .read_file(&locator.owner, &locator.repo, &file.path)
                    .await
                    .unwrap_or_default();
                if let (Some(slot), Some(content)) =
                    (self.contents.get_mut(index), fetched.as_ref())
                {
                    *slot = Some(content.clone());
                }
                fetched
            }
        };
        let Some(text) = content else {
            self.inspect_state = InspectState::Failed(index);
            return Err(Error::ContentUnavailable(file.path));
        };

        let dependencies = self
            .graph
            .as_ref()
            .map(|graph| graph.dependencies_of(index).to_vec())
            .unwrap_or_default();

        self.inspect_state = InspectState::Ready(index);
        Ok(FileInspection {
            line_count: text.lines().count(),
            byte_size: text.len(),
            text,
            dependencies,
        })
    }

    /// All usage occurrences of one file's imported symbols
    ///
    /// Requires the file's content to be present in the session (a prior
    /// `inspect_file` or the analyzed prefix).
    pub fn usage_occurrences(&self, index: usize) -> Result<Vec<UsageOccurrence>> {
        let file = self.files.get(index).ok_or(Error::UnknownFile(index))?;
        let content = self
            .contents
            .get(index)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::ContentUnavailable(file.path.clone()))?;
        let graph = self.graph.as_ref().ok_or(Error::NoActiveScan)?;

        let locator = UsageLocator::new();
        let mut occurrences = Vec::new();
        for dep in graph.dependencies_of(index) {
            occurrences.extend(locator.locate(content, &dep.names, dep.line));
        }
        Ok(occurrences)
    }

    /// Annotate rendered markup with cross-reference markers for one file
    ///
    /// Synchronous and pure with respect to the session's data model.
    pub fn locate_and_highlight(&self, index: usize, markup: &str) -> Result<String> {
        if index >= self.files.len() {
            return Err(Error::UnknownFile(index));
        }
        let graph = self.graph.as_ref().ok_or(Error::NoActiveScan)?;
        Ok(Highlighter::new().annotate(markup, graph.dependencies_of(index)))
    }

    /// Resolve a dependency record to the file index to navigate to
    pub fn resolve_navigation_target(&self, dep: &ResolvedDependency) -> Option<usize> {
        match self.files.get(dep.target) {
            Some(file) if file.path == dep.target_path => Some(dep.target),
            _ => self.files.iter().position(|f| f.path == dep.target_path),
        }
    }

    /// Close the current inspection, e.g. before navigating to a dependency
    pub fn close_inspection(&mut self) {
        self.inspect_state = InspectState::Closed;
    }

    pub fn inspect_state(&self) -> InspectState {
        self.inspect_state
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }

    pub fn repo(&self) -> Option<&RepoLocator> {
        self.locator.as_ref()
    }
}
