//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe upstream requests and responses as plain data. The
//! core crate builds `HttpRequest` values and parses `HttpResponse` values
//! without ever touching the network; the gateway (or a test harness) executes
//! the actual I/O with whatever client it prefers.
//!
//! Status codes travel as data. Executors must hand back 4xx/5xx responses
//! unchanged so the status policy stays in one place.

/// HTTP method for an upstream request. The todo service only needs reads
/// and creations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An upstream HTTP request described as plain data.
///
/// `path` is the absolute URL, base included.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An upstream HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}
