use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error::{ApiError, StoreError},
    pagination::{paginate, Page, PageQuery},
    repo,
    store::Store,
    types::{Todo, TodoInput},
};

pub async fn list_todos(
    State(store): State<Store>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Todo>>, ApiError> {
    let (page, limit) = PageQuery::from_pairs(pairs).resolve();
    let todos = blocking(move || store.read(repo::list_all)).await?;
    Ok(Json(paginate(todos, page, limit)))
}

pub async fn get_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    blocking(move || store.read(|tx| repo::get(tx, id)))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_todo(
    State(store): State<Store>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = decode_body(&body)?;
    let todo = blocking(move || store.write(|tx| repo::create(tx, input))).await?;
    debug!(id = todo.id, "created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let input = decode_body(&body)?;
    let todo = blocking(move || store.write(|tx| repo::upsert(tx, id, input))).await?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    blocking(move || store.write(|tx| repo::delete(tx, id))).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Decode a todo body from raw bytes. The Content-Type header is not
/// consulted.
fn decode_body(body: &[u8]) -> Result<TodoInput, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::MalformedBody)
}

/// Run a store transaction on the blocking pool. redb commits block on fsync.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
