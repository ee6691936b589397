//! Synchronous client core for the upstream todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The gateway executes the
//! actual HTTP round-trip, which keeps the forwarding contract deterministic
//! and testable without a server.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each upstream operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The 5xx-to-empty fallback lives in `parse_list_todos_by_category` and
//!   nowhere else.
//! - Sorting and counting are free functions in `transform`.

pub mod client;
pub mod error;
pub mod http;
pub mod transform;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::Category;
