use super::{decode, Endpoint};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AuthResponse, LoginRequest};

/// Client for `POST /login`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: Endpoint,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, ""),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            endpoint: Endpoint::from_config(config, ""),
        }
    }

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.endpoint
            .json(HttpMethod::Post, self.endpoint.url("/login"), credentials)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthResponse, ApiError> {
        decode(response)
    }
}
