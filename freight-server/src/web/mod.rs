//! Web layer for the freight lookup service.
//!
//! Provides the JSON API over the reference datasets and the live status
//! resolver.

mod dto;
mod routes;
mod state;


pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveAppState};
