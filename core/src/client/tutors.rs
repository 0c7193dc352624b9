use super::{check_status, decode, Endpoint, ResourceClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Tutor, TutorPayload};

/// Client for `/tutores`.
#[derive(Debug, Clone)]
pub struct TutorClient {
    endpoint: Endpoint,
}

impl TutorClient {
    pub const RESOURCE: &'static str = "/tutores";

    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: Endpoint::new(base_url, Self::RESOURCE),
        }
    }

    pub fn from_config(config: &ClientConfig, token: Option<&str>) -> Self {
        Self {
            endpoint: Endpoint::from_config(config, Self::RESOURCE).with_token(token),
        }
    }

    pub fn with_token(self, token: Option<&str>) -> Self {
        Self {
            endpoint: self.endpoint.with_token(token),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Get, self.endpoint.url(""), None)
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Get, self.endpoint.url(&format!("/{id}")), None)
    }

    pub fn build_create(&self, input: &TutorPayload) -> Result<HttpRequest, ApiError> {
        self.endpoint
            .json(HttpMethod::Post, self.endpoint.url(""), input)
    }

    pub fn build_update(&self, id: i64, input: &TutorPayload) -> Result<HttpRequest, ApiError> {
        self.endpoint
            .json(HttpMethod::Put, self.endpoint.url(&format!("/{id}")), input)
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Delete, self.endpoint.url(&format!("/{id}")), None)
    }

    /// `GET /tutores/search?nome=<name>`
    pub fn build_search(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let url = self.endpoint.url_with_query("/search", &[("nome", name)])?;
        Ok(self.endpoint.request(HttpMethod::Get, url, None))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Tutor>, ApiError> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Tutor>, ApiError> {
        decode(response)
    }
}

impl ResourceClient for TutorClient {
    type Record = Tutor;
    type Payload = TutorPayload;

    fn build_list(&self) -> HttpRequest {
        TutorClient::build_list(self)
    }

    fn build_create(&self, payload: &TutorPayload) -> Result<HttpRequest, ApiError> {
        TutorClient::build_create(self, payload)
    }

    fn build_update(&self, id: i64, payload: &TutorPayload) -> Result<HttpRequest, ApiError> {
        TutorClient::build_update(self, id, payload)
    }

    fn build_delete(&self, id: i64) -> HttpRequest {
        TutorClient::build_delete(self, id)
    }

    fn parse_list(&self, response: HttpResponse) -> Result<Vec<Tutor>, ApiError> {
        TutorClient::parse_list(self, response)
    }

    fn parse_saved(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        TutorClient::parse_create(self, response)
    }

    fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        TutorClient::parse_delete(self, response)
    }
}
