//! HTTP surface of the tax advisory service.
//!
//! Provides REST endpoints for:
//! - the AI tax assistant chat and its per-session history
//! - income tax calculation under the old and new regimes
//! - contact requests, document uploads and the service catalogue

pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod logging;
pub mod models;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
