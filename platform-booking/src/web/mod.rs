//! Web layer for platform booking.
//!
//! Exposes one station over HTTP: inspect it, register lines and platforms,
//! and book stoppages or through trains.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
