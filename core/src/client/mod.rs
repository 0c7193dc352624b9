//! Stateless HTTP request builders and response parsers, one per resource.
//!
//! # Design
//! Every client wraps an [`Endpoint`]: the resource-scoped base URL, the
//! bearer token (if the session has one) and the configured timeout. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes the `HttpResponse`; the host performs
//! the round-trip in between. The CRUD subset is also exposed through
//! [`ResourceClient`] so screens can drive any resource the same way.

mod auth;
mod pets;
mod tutors;
mod vaccines;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub use auth::AuthClient;
pub use pets::PetClient;
pub use tutors::TutorClient;
pub use vaccines::VaccineClient;

/// The CRUD surface shared by tutors, pets and vaccines.
pub trait ResourceClient {
    /// What the screens see.
    type Record;
    /// What create/update send.
    type Payload;

    fn build_list(&self) -> HttpRequest;
    fn build_create(&self, payload: &Self::Payload) -> Result<HttpRequest, ApiError>;
    fn build_update(&self, id: i64, payload: &Self::Payload) -> Result<HttpRequest, ApiError>;
    fn build_delete(&self, id: i64) -> HttpRequest;

    fn parse_list(&self, response: HttpResponse) -> Result<Vec<Self::Record>, ApiError>;
    fn parse_saved(&self, response: HttpResponse) -> Result<Self::Record, ApiError>;
    fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError>;
}

/// Base URL plus per-request decorations shared by every client.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: String,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl Endpoint {
    /// `resource` is the path prefix, e.g. `/pets`; empty for the origin.
    pub fn new(origin: &str, resource: &str) -> Self {
        Self {
            base: format!("{}{resource}", origin.trim_end_matches('/')),
            token: None,
            timeout: None,
        }
    }

    pub fn from_config(config: &ClientConfig, resource: &str) -> Self {
        let mut endpoint = Self::new(&config.base_url, resource);
        endpoint.timeout = config.timeout;
        endpoint
    }

    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.base)
    }

    /// `base + suffix` with the given query parameters, percent-encoded.
    pub fn url_with_query(&self, suffix: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let mut url =
            Url::parse(&self.url(suffix)).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(query.iter().copied());
        Ok(url.into())
    }

    pub fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        debug!(method = method.as_str(), url = %path, "built request");
        HttpRequest {
            method,
            path,
            headers,
            body,
            timeout: self.timeout,
        }
    }

    pub fn json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(method, path, Some(body)))
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    let url = response.url.as_deref().unwrap_or("<unknown>");
    if response.is_success() {
        debug!(status = response.status, url, "response received");
        return Ok(());
    }
    let err = ApiError::from_response(response);
    warn!(status = response.status, url, error = %err, "request failed");
    Err(err)
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
