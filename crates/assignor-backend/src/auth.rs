use assignor_core::{AssignorError, AssignorResult};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

/// Produces a bearer token usable against the question-answering backend.
///
/// Obtaining a token is allowed to fail; the dispatcher treats that as fatal
/// for the whole batch.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Returns a bearer token.
    async fn bearer_token(&self) -> AssignorResult<String>;

    /// Obtains a fresh token, bypassing any cache. Called once before each
    /// fan-out batch.
    async fn refresh(&self) -> AssignorResult<String> {
        self.bearer_token().await
    }
}

/// A fixed token taken from configuration or the environment.
pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    /// Wraps a pre-obtained token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn bearer_token(&self) -> AssignorResult<String> {
        if self.token.is_empty() {
            return Err(AssignorError::Credential(
                "no bearer token configured".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}

/// Process-wide token cache around any [`CredentialSource`].
///
/// Reads are concurrent; a refresh serializes behind a write lock so two
/// pipeline runs cannot race one. The dispatcher refreshes once before each
/// fan-out batch.
pub struct CachedCredentials<S> {
    inner: S,
    cached: RwLock<Option<String>>,
}

impl<S: CredentialSource> CachedCredentials<S> {
    /// Wraps a credential source with a cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cached: RwLock::new(None),
        }
    }
}

#[async_trait]
impl<S: CredentialSource> CredentialSource for CachedCredentials<S> {
    async fn bearer_token(&self) -> AssignorResult<String> {
        if let Some(token) = self.cached.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.refresh().await
    }

    async fn refresh(&self) -> AssignorResult<String> {
        let mut cached = self.cached.write().await;
        let token = self.inner.bearer_token().await?;
        info!("Bearer credential refreshed");
        *cached = Some(token.clone());
        Ok(token)
    }
}
