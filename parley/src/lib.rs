pub use parley_core::model::{ConnectionId, Identity, RoomKey};

pub mod model {
    pub use parley_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use parley_server::*;
}
