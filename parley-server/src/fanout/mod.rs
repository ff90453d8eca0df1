mod event_publisher;
mod fanout;

pub use event_publisher::*;
pub use fanout::*;
