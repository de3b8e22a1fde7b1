//! Web layer for the AED router.
//!
//! Exposes navigation and the banner lookup as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
