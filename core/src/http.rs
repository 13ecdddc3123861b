//! HTTP requests and responses as plain data.
//!
//! The client builds `HttpRequest` values and parses `HttpResponse` values;
//! whoever holds a socket performs the round-trip in between.

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A request to execute. `url` is absolute and already carries any query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn bodyless(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json(method: HttpMethod, url: String, body: String) -> Self {
        let (name, value) = JSON_CONTENT_TYPE;
        Self {
            method,
            url,
            headers: vec![(name.to_string(), value.to_string())],
            body: Some(body),
        }
    }
}

/// The outcome of executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
