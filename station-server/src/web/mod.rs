//! Web layer for the station service.
//!
//! JSON endpoints over the station repository and the departures
//! pass-through.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
