pub mod dto;
pub mod handlers;
pub mod router;

pub use dto::*;
pub use router::{create_router, AppState};
