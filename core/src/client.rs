//! Stateless request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming the
//! matching `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Health, Page, Todo, TodoInput};

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

    /// `GET /todos`. Unset `page` / `limit` are left for the server to default.
    pub fn build_list_todos(&self, page: Option<u64>, limit: Option<u64>) -> HttpRequest {
        let query: Vec<String> = [("page", page), ("limit", limit)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        let mut url = self.url("/todos");
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        HttpRequest::bodyless(HttpMethod::Get, url)
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.url(&format!("/todos/{id}")))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(HttpMethod::Post, self.url("/todos"), encode(input)?))
    }

    /// `PUT /todos/{id}`. The server upserts: an unknown id is created.
    pub fn build_update_todo(&self, id: u64, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/todos/{id}")),
            encode(input)?,
        ))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.url("/health"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Page<Todo>, ApiError> {
        decode(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(response, 200)
    }

    /// Succeeds whether or not the todo existed.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        decode(response, 200)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(ApiError::Serialization)
}

fn decode<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        400 => Err(ApiError::BadRequest(response.body.clone())),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
