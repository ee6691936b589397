//! Executes core `HttpRequest` values against the upstream todo service.
//!
//! # Design
//! One pooled `reqwest::Client` is built at startup and shared by every
//! handler (clones share the pool). Status codes are returned as data; the
//! core client decides what a 4xx or 5xx means. No retries, and the only
//! timeout is the optional connect timeout. Proxy environment variables are
//! ignored; the upstream is always dialed directly.

use std::time::Duration;

use reqwest::Method;
use todo_core::{HttpMethod, HttpRequest, HttpResponse};

use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct Upstream {
    http: reqwest::Client,
}

impl Upstream {
    pub fn new(connect_timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, GatewayError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "forwarding upstream");

        let method = match req.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.http.request(method, &req.path);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, path = %req.path, "upstream answered");
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
