use parley_core::IceServerConfig;
use serde::Deserialize;
use std::time::Duration;

/// Runtime settings for the relay and its WebSocket gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Capacity of the hub command channel.
    pub command_buffer: usize,
    #[serde(with = "secs")]
    pub heartbeat_interval: Duration,
    /// Idle window after which a silent socket counts as dropped.
    #[serde(with = "secs")]
    pub client_timeout: Duration,
    #[serde(with = "secs")]
    pub handshake_timeout: Duration,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            command_buffer: 1024,
            heartbeat_interval: Duration::from_secs(25),
            client_timeout: Duration::from_secs(60),
            handshake_timeout: Duration::from_secs(10),
            ice_servers: vec![IceServerConfig {
                urls: vec!["stun:stun.l.google.com:19302".to_owned()],
                username: None,
                credential: None,
            }],
        }
    }
}

mod secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
