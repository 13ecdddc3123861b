//! HTTP todo service persisted to a single-file embedded store.
//!
//! # Overview
//! `Store` owns the redb file; `repo` runs todo operations inside its
//! transactions; `pagination` slices listings; `handlers` map requests onto
//! all of it. The store is built by the caller and injected as router state.

pub mod config;
pub mod error;
mod handlers;
pub mod pagination;
pub mod repo;
pub mod store;
pub mod types;

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::{ApiError, StoreError};
pub use pagination::{paginate, Page, PageQuery};
pub use store::Store;
pub use types::{Todo, TodoInput};

pub fn app(store: Store) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/health", get(handlers::health))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Serve until `shutdown` resolves, then wait for in-flight requests.
pub async fn run_until(
    listener: TcpListener,
    store: Store,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
