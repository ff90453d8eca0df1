use async_trait::async_trait;
use parley_core::Identity;

/// Identity provider seam: resolves an opaque bearer token to a user identity.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `None` means the token is not valid.
    async fn verify(&self, token: &str) -> Option<Identity>;
}
