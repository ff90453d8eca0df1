use crate::auth::TokenVerifier;
use async_trait::async_trait;
use dashmap::DashMap;
use parley_core::Identity;
use std::sync::Arc;

/// In-memory token table. Meant for development setups and tests.
#[derive(Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: Arc<DashMap<String, Identity>>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens<I, T, U>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<Identity>,
    {
        let verifier = Self::new();
        for (token, identity) in tokens {
            verifier.insert(token, identity);
        }
        verifier
    }

    pub fn insert(&self, token: impl Into<String>, identity: impl Into<Identity>) {
        self.tokens.insert(token.into(), identity.into());
    }

    pub fn revoke(&self, token: &str) -> Option<Identity> {
        self.tokens.remove(token).map(|(_, identity)| identity)
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).map(|entry| entry.value().clone())
    }
}
