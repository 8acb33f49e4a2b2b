// Test content fetching

use crate::model::{ContentType, TestContent};
use crate::runner::error::{Result, RunnerError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name fetched content is written to
pub const CONTENT_FILE_NAME: &str = "test-content";

/// Resolves test content to a local path
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, content: &TestContent) -> Result<PathBuf>;

    /// Whether the content resolves to a single file
    fn is_file(&self, content: &TestContent) -> bool {
        content.is_file()
    }
}

/// Fetches inline and URI content into a local directory
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    dir: PathBuf,
    client: reqwest::Client,
}

impl LocalFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            client: reqwest::Client::new(),
        }
    }

    fn target(&self) -> PathBuf {
        self.dir.join(CONTENT_FILE_NAME)
    }

    async fn write(&self, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.target();
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "test content written");
        Ok(path)
    }

    async fn fetch_uri(&self, uri: &str) -> Result<PathBuf> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            info!(uri = %uri, "downloading test content");
            let bytes = self
                .client
                .get(uri)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            return self.write(&bytes).await;
        }

        let local = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        let bytes = tokio::fs::read(local).await.map_err(|e| {
            RunnerError::FetchFailed(format!("{}: {}", local.display(), e))
        })?;
        self.write(&bytes).await
    }
}

#[async_trait]
impl ContentFetcher for LocalFetcher {
    async fn fetch(&self, content: &TestContent) -> Result<PathBuf> {
        match content.content_type {
            ContentType::String => {
                let data = content.data.as_deref().ok_or_else(|| {
                    RunnerError::FetchFailed("string content has no data".to_string())
                })?;
                self.write(data.as_bytes()).await
            }
            ContentType::FileUri => {
                let uri = content.uri.as_deref().ok_or_else(|| {
                    RunnerError::FetchFailed("file-uri content has no uri".to_string())
                })?;
                self.fetch_uri(uri).await
            }
            other => Err(RunnerError::UnsupportedContent(other)),
        }
    }
}
