//! Synchronous client core for the todo service.
//!
//! # Overview
//! `TodoClient` turns API calls into `HttpRequest` values and `HttpResponse`
//! values back into typed results. It never touches the network: the caller
//! executes the round-trip, which keeps the core deterministic.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Health, Page, Todo, TodoInput};
