//! Credential provider port.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Bearer credential attached to task authority requests.
///
/// The token value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Formats the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Supplies bearer tokens for the current session.
///
/// Token acquisition, refresh, and login flows live behind this port.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a token valid for the next authority call.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when no token can be obtained.
    async fn bearer_token(&self) -> Result<BearerToken, CredentialError>;
}

/// Errors returned by credential providers.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// The user is not signed in.
    #[error("no active login session")]
    NotSignedIn,

    /// Token acquisition failed.
    #[error("token acquisition failed: {0}")]
    Acquisition(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialError {
    /// Wraps a token acquisition error.
    #[must_use]
    pub fn acquisition(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Acquisition(Arc::new(err))
    }
}
