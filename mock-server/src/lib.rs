use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

#[derive(Default)]
pub struct Store {
    pub todos: Vec<String>,
    pub categories: BTreeMap<String, Vec<String>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

/// Router over a pre-seeded store.
pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todo", post(add_todo))
        .route("/todos/category", post(add_category))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(
    State(db): State<Db>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let store = db.read().await;
    match filter.category {
        None => Ok(Json(store.todos.clone())),
        Some(category) => store
            .categories
            .get(&category)
            .cloned()
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND),
    }
}

async fn add_todo(
    State(db): State<Db>,
    Query(filter): Query<CategoryFilter>,
    todo: String,
) -> StatusCode {
    if todo.trim().is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let mut store = db.write().await;
    if let Some(category) = filter.category {
        store.categories.entry(category).or_default().push(todo.clone());
    }
    tracing::debug!(todo = %todo, "todo added");
    store.todos.push(todo);
    StatusCode::CREATED
}

async fn add_category(
    State(db): State<Db>,
    Json(category): Json<Category>,
) -> Result<(StatusCode, String), StatusCode> {
    if category.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    db.write()
        .await
        .categories
        .entry(category.name.clone())
        .or_default();
    tracing::debug!(category = %category.name, "category registered");
    Ok((StatusCode::ACCEPTED, category.name))
}
