//! nudge-server: HTTP surface for the conversation runner.
//!
//! Routes:
//! - `POST /api/chat`: one exchange, optionally biased away from a substring
//! - `GET /health`: liveness and configured model
//! - `GET /` and static assets: the chat UI

pub mod config;
pub mod error;
mod handlers;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::{router, serve};
pub use state::AppState;
