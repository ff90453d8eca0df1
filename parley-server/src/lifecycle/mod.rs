mod connection_state;
mod eviction;

pub use connection_state::*;
pub use eviction::*;
