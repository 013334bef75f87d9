//! HTTP API for the flightwx server.

mod error;
pub mod request_id;
mod routes;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub use error::ApiError;

/// Full application router with state applied.
pub fn router(state: Arc<AppState>) -> Router {
    routes::create_router().with_state(state)
}

#[cfg(test)]
mod tests;
