//! HTTP gateway in front of the upstream todo service.
//!
//! # Overview
//! ```text
//!   client ──▶ axum router ──▶ handler ──▶ todo_core::TodoClient::build_*
//!                                              │
//!                                              ▼
//!                                     Upstream::execute (reqwest)
//!                                              │
//!   client ◀── IntoResponse ◀── transform ◀── todo_core::TodoClient::parse_*
//! ```
//!
//! One inbound request maps to exactly one upstream request. Nothing is
//! cached or retried, and no state survives a request.

pub mod config;
pub mod error;
pub mod server;
pub mod upstream;

pub use config::{ApiVariant, ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use server::{router, AppState, GatewayServer};
pub use upstream::Upstream;
