//! HTTP service for smell lookups
//!
//! `POST /api/smells` multiplexes the three table queries on its `type`
//! field. Axum handles routing; a request-context middleware logs every call
//! and the access layer enforces the configured cross-origin policy.

pub mod access;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use routing::create_router;
pub use state::AppState;
