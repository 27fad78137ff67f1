//! Fixed credential providers.

use async_trait::async_trait;

use crate::task::ports::{BearerToken, CredentialError, CredentialProvider};

/// Provider that always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    token: BearerToken,
}

impl StaticCredentialProvider {
    /// Creates a provider for `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn bearer_token(&self) -> Result<BearerToken, CredentialError> {
        Ok(self.token.clone())
    }
}

/// Provider for a signed-out user; every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCredentialProvider;

#[async_trait]
impl CredentialProvider for FailingCredentialProvider {
    async fn bearer_token(&self) -> Result<BearerToken, CredentialError> {
        Err(CredentialError::NotSignedIn)
    }
}
