use crate::auth::TokenVerifier;
use crate::error::{AuthFailure, RelayError, Result};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use parley_core::Identity;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Handshake gate: turns the caller-supplied credential into an identity
/// before the socket is accepted.
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn TokenVerifier>,
    timeout: Duration,
}

impl Authenticator {
    pub fn new(verifier: Arc<dyn TokenVerifier>, timeout: Duration) -> Self {
        Self { verifier, timeout }
    }

    pub async fn authenticate(&self, token: Option<&str>) -> Result<Identity> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RelayError::AuthenticationFailed(AuthFailure::MissingToken))?;

        match tokio::time::timeout(self.timeout, self.verifier.verify(token)).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(RelayError::AuthenticationFailed(AuthFailure::InvalidToken)),
            Err(_) => {
                warn!(timeout = ?self.timeout, "Token verification timed out");
                Err(RelayError::AuthenticationFailed(AuthFailure::InvalidToken))
            }
        }
    }
}

/// Picks the bearer credential from the `token` query parameter or, failing
/// that, the `Authorization: Bearer` header.
pub fn token_from_request(query_token: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = query_token.filter(|t| !t.is_empty()) {
        return Some(token.to_owned());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}
