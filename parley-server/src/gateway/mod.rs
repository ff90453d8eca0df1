mod gateway_state;
mod http_handlers;
mod router;
mod ws_handler;

pub use gateway_state::*;
pub use http_handlers::*;
pub use router::*;
pub use ws_handler::*;
