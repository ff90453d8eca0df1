mod auth;
mod config;
mod error;
mod fanout;
mod gateway;
mod lifecycle;
mod registry;
mod relay;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use fanout::*;
pub use gateway::*;
pub use lifecycle::*;
pub use registry::*;
pub use relay::*;
