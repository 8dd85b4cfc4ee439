//! Remote repository content access
//!
//! The engine talks to the content host through the [`ContentProvider`]
//! trait: directory listings and raw file reads, nothing else. Listing
//! failures are errors; per-file read failures are `Ok(None)` so a single
//! bad file never aborts a scan.

pub mod github;
pub use github::GitHubProvider;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of a remote directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a remote directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    /// Repository-relative path
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    /// Direct download reference, when the host provides one
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Read access to a remote repository's tree and file contents
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// List one directory of the repository
    ///
    /// Fails with [`Error::Remote`] when the repository, owner, or path does
    /// not exist or access is denied.
    async fn list_directory(&self, owner: &str, repo: &str, path: &str)
        -> Result<Vec<RemoteEntry>>;

    /// Read one file as text, decoding any transport-level encoding
    ///
    /// Per-file fetch failures return `Ok(None)`, never an error: the caller
    /// skips extraction for that file but keeps its graph node.
    async fn read_file(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>>;
}

/// Parsed repository identity: `<host>/<owner>/<repo>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLocator {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepoLocator {
    /// Parse a repository URL or `host/owner/repo` string
    ///
    /// A trailing `.git` suffix is stripped from the repository name. Any
    /// other shape fails with [`Error::InvalidRepoUrl`] before any network
    /// call is made.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let without_scheme = match trimmed.split_once("://") {
            Some((_, rest)) => rest,
            None => trimmed,
        };
        let mut segments = without_scheme.split('/').filter(|s| !s.is_empty());
        let (host, owner, repo) = match (segments.next(), segments.next(), segments.next()) {
            (Some(host), Some(owner), Some(repo)) => (host, owner, repo),
            _ => return Err(Error::InvalidRepoUrl(input.to_string())),
        };
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if host.is_empty() || owner.is_empty() || repo.is_empty() {
            return Err(Error::InvalidRepoUrl(input.to_string()));
        }
        Ok(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.repo)
    }
}
