pub mod config_flow;
pub mod connection;
pub mod event;
pub mod requests;

pub use config_flow::{FlowResult, FormField, OptionsInput, UserInput};
pub use connection::{ConfigEntry, ConnectionConfig, EntrySource, DOMAIN};
pub use event::{Event, SignedUrlEvent, EVENT_SIGNED_URL};
pub use requests::*;
