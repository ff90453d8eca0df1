use crate::auth::TokenVerifier;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use parley_core::Identity;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies HS256 JSON Web Tokens issued by the identity provider.
/// The user identity is the `sub` claim; `exp` is required.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Also require the `iss` claim to match.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Option<Identity> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) if !data.claims.sub.is_empty() => Some(Identity::new(data.claims.sub)),
            Ok(_) => {
                debug!("JWT without subject rejected");
                None
            }
            Err(e) => {
                debug!(error = %e, "JWT rejected");
                None
            }
        }
    }
}
