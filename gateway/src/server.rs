//! Router, handlers and server lifecycle.
//!
//! Every handler forwards exactly one upstream request: build it with the
//! core client, execute it, parse the answer, optionally transform it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use todo_core::{transform, Category, TodoClient};
use tower_http::trace::TraceLayer;

use crate::config::{ApiVariant, GatewayConfig};
use crate::error::GatewayError;
use crate::upstream::Upstream;

/// Application state injected into handlers. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: TodoClient,
    pub upstream: Upstream,
    pub variant: ApiVariant,
}

impl AppState {
    pub fn new(external_api_url: &str, upstream: Upstream, variant: ApiVariant) -> Self {
        Self {
            client: TodoClient::new(external_api_url),
            upstream,
            variant,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let upstream = Upstream::new(config.connect_timeout())?;
        Ok(Self::new(&config.external_api_url, upstream, config.api_variant))
    }
}

/// Build the public API router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/todos", get(list_todos))
        .route("/api/todos/{category}", get(list_todos_by_category))
        .route(
            "/api/todos/category",
            get(list_todos_in_category_named_category).post(create_category),
        )
        .route("/api/todo", post(add_todo));

    if state.variant == ApiVariant::Sorted {
        router = router.route("/api/todos/count", get(count_todos));
    }

    router.with_state(state).layer(TraceLayer::new_for_http())
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let state = AppState::from_config(&config)?;
        Ok(Self {
            router: router(state),
            config,
        })
    }

    /// Run the server until ctrl-c.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.external_api_url,
            variant = ?self.config.api_variant,
            "todo gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("todo gateway stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<String>>, GatewayError> {
    let response = state.upstream.execute(state.client.build_list_todos()).await?;
    let todos = state.client.parse_list_todos(response)?;
    Ok(Json(match state.variant {
        ApiVariant::Plain => todos,
        ApiVariant::Sorted => transform::sorted(todos),
    }))
}

async fn count_todos(State(state): State<AppState>) -> Result<Json<usize>, GatewayError> {
    let response = state.upstream.execute(state.client.build_list_todos()).await?;
    let todos = state.client.parse_list_todos(response)?;
    Ok(Json(transform::count(&todos)))
}

async fn list_todos_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<String>>, GatewayError> {
    forward_by_category(&state, &category).await.map(Json)
}

/// `/api/todos/category` is also the POST route for creating categories, so
/// a GET on it never reaches the `{category}` route.
async fn list_todos_in_category_named_category(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, GatewayError> {
    forward_by_category(&state, "category").await.map(Json)
}

async fn forward_by_category(state: &AppState, category: &str) -> Result<Vec<String>, GatewayError> {
    let request = state.client.build_list_todos_by_category(category);
    let response = state.upstream.execute(request).await?;
    Ok(state.client.parse_list_todos_by_category(response)?)
}

async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> Result<String, GatewayError> {
    let request = state.client.build_create_category(&category)?;
    let response = state.upstream.execute(request).await?;
    Ok(state.client.parse_create_category(response)?)
}

async fn add_todo(State(state): State<AppState>, todo: String) -> Result<StatusCode, GatewayError> {
    let response = state.upstream.execute(state.client.build_add_todo(&todo)).await?;
    state.client.parse_add_todo(response)?;
    Ok(StatusCode::CREATED)
}
