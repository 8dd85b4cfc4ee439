//! GitHub contents-API provider
//!
//! Lists directories and reads files through the REST contents endpoint.
//! File bodies arrive base64-encoded (with embedded newlines) and are decoded
//! before being returned; when decoding is not possible the raw download URL
//! is fetched instead.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::remote::{ContentProvider, EntryKind, RemoteEntry};

const USER_AGENT: &str = concat!("repograph/", env!("CARGO_PKG_VERSION"));

/// Content provider backed by the GitHub REST API
pub struct GitHubProvider {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

/// Raw contents-API entry; `type` may be values we do not surface
#[derive(Debug, Deserialize)]
struct ApiEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    download_url: Option<String>,
}

/// Contents-API file body
#[derive(Debug, Deserialize)]
struct ApiFile {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

impl GitHubProvider {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        if path.is_empty() {
            format!("{}/repos/{}/{}/contents", self.api_base, owner, repo)
        } else {
            format!("{}/repos/{}/{}/contents/{}", self.api_base, owner, repo, path)
        }
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Fetch the raw download URL as plain text
    async fn fetch_download(&self, url: &str) -> Option<String> {
        let response = self.request(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

#[async_trait::async_trait]
impl ContentProvider for GitHubProvider {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RemoteEntry>> {
        let url = self.contents_url(owner, repo, path);
        let response = self.request(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }
        let entries: Vec<ApiEntry> = response.json().await?;
        let entries = entries
            .into_iter()
            .filter_map(|entry| {
                let kind = match entry.kind.as_str() {
                    "file" => EntryKind::File,
                    "dir" => EntryKind::Dir,
                    // Symlinks and submodules are not part of the scan
                    _ => return None,
                };
                Some(RemoteEntry {
                    name: entry.name,
                    path: entry.path,
                    kind,
                    size: entry.size,
                    download_url: entry.download_url,
                })
            })
            .collect();
        Ok(entries)
    }

    async fn read_file(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>> {
        let url = self.contents_url(owner, repo, path);
        let response = match self.request(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(path, %error, "file fetch failed");
                return Ok(None);
            }
        };
        if !response.status().is_success() {
            tracing::warn!(path, status = %response.status(), "file fetch rejected");
            return Ok(None);
        }
        let file: ApiFile = match response.json().await {
            Ok(file) => file,
            Err(error) => {
                tracing::warn!(path, %error, "file body was not valid JSON");
                return Ok(None);
            }
        };

        if file.encoding.as_deref() == Some("base64") {
            if let Some(content) = &file.content {
                let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                if let Ok(bytes) = BASE64.decode(compact) {
                    if let Ok(text) = String::from_utf8(bytes) {
                        return Ok(Some(text));
                    }
                }
                tracing::warn!(path, "could not decode base64 content");
            }
        }

        // Fall back to the raw download reference
        if let Some(download_url) = &file.download_url {
            return Ok(self.fetch_download(download_url).await);
        }
        Ok(None)
    }
}
