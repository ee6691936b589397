//! Stateless request builder and response parser for the upstream todo
//! service.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each upstream operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round-trip in between.
//!
//! Every operation treats any 2xx as success. Only
//! `parse_list_todos_by_category` recovers from an error, turning an upstream
//! 5xx into an empty list.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Category;

/// Synchronous, stateless client for the upstream todo service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The category is appended to the query string as given. No escaping or
    /// validation happens here.
    pub fn build_list_todos_by_category(&self, category: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos?category={category}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_category(&self, category: &Category) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(category).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos/category", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_add_todo(&self, todo: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todo", self.base_url),
            headers: vec![(
                "content-type".to_string(),
                "text/plain; charset=utf-8".to_string(),
            )],
            body: Some(todo.to_string()),
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Like `parse_list_todos`, except that an upstream 5xx yields an empty
    /// list. 4xx and every other failure still propagate.
    pub fn parse_list_todos_by_category(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        match self.parse_list_todos(response) {
            Err(ApiError::UpstreamUnavailable { status, .. }) => {
                tracing::warn!(status, "upstream unavailable, answering with an empty list");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Returns the upstream body untouched.
    pub fn parse_create_category(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }

    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_todos_by_category_appends_query() {
        let req = client().build_list_todos_by_category("holiday");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos?category=holiday");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_todos_by_category_does_not_escape() {
        let req = client().build_list_todos_by_category("a b&c");
        assert_eq!(req.path, "http://localhost:3000/todos?category=a b&c");
    }

    #[test]
    fn build_create_category_produces_json_body() {
        let req = client().build_create_category(&Category::new("holiday")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos/category");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "holiday" }));
    }

    #[test]
    fn build_add_todo_sends_raw_text() {
        let req = client().build_add_todo("Mow the lawn");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert_eq!(req.body.as_deref(), Some("Mow the lawn"));
    }

    #[test]
    fn parse_list_todos_keeps_upstream_order() {
        let resp = response(200, r#"["Call Mum","Buy flowers for my wife","Clean the car"]"#);
        let todos = client().parse_list_todos(resp).unwrap();
        assert_eq!(todos, vec!["Call Mum", "Buy flowers for my wife", "Clean the car"]);
    }

    #[test]
    fn parse_list_todos_propagates_server_error() {
        let err = client().parse_list_todos(response(503, "down")).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable { status: 503, .. }));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_by_category_falls_back_on_server_error() {
        for status in [500, 502, 503, 599] {
            let todos = client()
                .parse_list_todos_by_category(response(status, "unavailable"))
                .unwrap();
            assert!(todos.is_empty(), "status {status} should fall back");
        }
    }

    #[test]
    fn parse_by_category_propagates_client_error() {
        for status in [400, 404, 499] {
            let err = client()
                .parse_list_todos_by_category(response(status, "nope"))
                .unwrap_err();
            assert!(
                matches!(err, ApiError::UpstreamClientError { status: s, .. } if s == status),
                "status {status} should propagate"
            );
        }
    }

    #[test]
    fn parse_by_category_propagates_bad_json() {
        let err = client()
            .parse_list_todos_by_category(response(200, "{"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_category_returns_body_verbatim() {
        let name = client().parse_create_category(response(202, "holiday")).unwrap();
        assert_eq!(name, "holiday");
    }

    #[test]
    fn parse_add_todo_accepts_any_success() {
        assert!(client().parse_add_todo(response(201, "")).is_ok());
        assert!(client().parse_add_todo(response(200, "whatever")).is_ok());
    }

    #[test]
    fn parse_add_todo_wrong_status() {
        let err = client().parse_add_todo(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::UpstreamUnavailable { status: 500, .. }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
    }
}
