pub mod config_entry_handlers;
pub mod event_handlers;
pub mod service_handlers;

pub use config_entry_handlers::*;
pub use event_handlers::*;
pub use service_handlers::*;
