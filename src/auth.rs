//! Authorization module
//!
//! Destructive operations ask an [`Authorizer`] whether the request may
//! proceed. The default adapter compares one header against a static token.

use hyper::header::{HeaderMap, HeaderName};
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing {0} header")]
    MissingCredentials(String),
    #[error("credentials rejected")]
    Rejected,
}

/// Decides whether a request carrying `headers` may perform a protected action
pub trait Authorizer: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError>;
}

/// Static token comparison against a single header
#[derive(Debug, Clone)]
pub struct StaticTokenAuthorizer {
    header: HeaderName,
    token: String,
}

impl StaticTokenAuthorizer {
    pub fn new(header: HeaderName, token: impl Into<String>) -> Self {
        Self {
            header,
            token: token.into(),
        }
    }

    /// Build from configuration, falling back to `Authorization` for an invalid header name
    pub fn from_config(config: &AuthConfig) -> Self {
        let header = HeaderName::from_bytes(config.header.as_bytes()).unwrap_or_else(|e| {
            crate::logger::log_warning(&format!(
                "Invalid auth header name '{}': {e}, using Authorization",
                config.header
            ));
            hyper::header::AUTHORIZATION
        });
        Self::new(header, config.token.clone())
    }
}

impl Authorizer for StaticTokenAuthorizer {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = headers
            .get(&self.header)
            .ok_or_else(|| AuthError::MissingCredentials(self.header.to_string()))?;

        if value.as_bytes() == self.token.as_bytes() {
            Ok(())
        } else {
            Err(AuthError::Rejected)
        }
    }
}
