use crate::auth::Authenticator;
use crate::config::RelayConfig;
use crate::relay::RelayHandle;
use std::sync::Arc;

/// Axum state shared by every gateway route.
#[derive(Clone)]
pub struct GatewayState {
    pub relay: RelayHandle,
    pub auth: Authenticator,
    pub config: Arc<RelayConfig>,
}

impl GatewayState {
    pub fn new(relay: RelayHandle, auth: Authenticator, config: RelayConfig) -> Self {
        Self {
            relay,
            auth,
            config: Arc::new(config),
        }
    }
}
