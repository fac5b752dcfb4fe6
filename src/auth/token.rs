use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TokenSource;
use crate::error::{ConsoleError, ConsoleResult};

/// Supplies the opaque bearer token attached to every backend request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> ConsoleResult<String>;
}

/// Fixed token, e.g. from the environment.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> ConsoleResult<String> {
        Ok(self.0.clone())
    }
}

/// Reads the token from a file on every call, so a token refreshed by
/// another process is picked up without restarting.
#[derive(Debug, Clone)]
pub struct FileToken {
    path: PathBuf,
}

impl FileToken {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenProvider for FileToken {
    async fn token(&self) -> ConsoleResult<String> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to read token file");
            ConsoleError::Token(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let token = raw.trim();
        if token.is_empty() {
            return Err(ConsoleError::Token(format!("{} is empty", self.path.display())));
        }

        Ok(token.to_string())
    }
}

pub fn provider_from_source(source: &TokenSource) -> Arc<dyn TokenProvider> {
    match source {
        TokenSource::Static(token) => Arc::new(StaticToken::new(token.clone())),
        TokenSource::File(path) => Arc::new(FileToken::new(path.clone())),
    }
}
