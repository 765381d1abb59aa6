//! # club-api
//!
//! REST API server built with Axum framework.
//!
//! Routes are mounted under `/api/v1`; health probes live at the root so they
//! bypass rate limiting.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
