mod relay_command;
mod relay_handle;
mod relay_hub;
mod relay_status;

pub use relay_command::*;
pub use relay_handle::*;
pub use relay_hub::*;
pub use relay_status::*;
