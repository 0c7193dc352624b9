use super::{check_status, decode, Endpoint, ResourceClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Vaccine, VaccinePayload};

/// Client for `/vacinas`.
#[derive(Debug, Clone)]
pub struct VaccineClient {
    endpoint: Endpoint,
}

impl VaccineClient {
    pub const RESOURCE: &'static str = "/vacinas";

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

    /// `GET /vacinas?petId=<id>`
    pub fn build_list_by_pet(&self, pet_id: i64) -> Result<HttpRequest, ApiError> {
        let pet_id = pet_id.to_string();
        let url = self.endpoint.url_with_query("", &[("petId", pet_id.as_str())])?;
        Ok(self.endpoint.request(HttpMethod::Get, url, None))
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Get, self.endpoint.url(&format!("/{id}")), None)
    }

    pub fn build_create(&self, input: &VaccinePayload) -> Result<HttpRequest, ApiError> {
        self.endpoint
            .json(HttpMethod::Post, self.endpoint.url(""), input)
    }

    pub fn build_update(&self, id: i64, input: &VaccinePayload) -> Result<HttpRequest, ApiError> {
        self.endpoint
            .json(HttpMethod::Put, self.endpoint.url(&format!("/{id}")), input)
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Delete, self.endpoint.url(&format!("/{id}")), None)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Vaccine>, ApiError> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Vaccine, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Vaccine, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Vaccine, ApiError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

impl ResourceClient for VaccineClient {
    type Record = Vaccine;
    type Payload = VaccinePayload;

    fn build_list(&self) -> HttpRequest {
        VaccineClient::build_list(self)
    }

    fn build_create(&self, payload: &VaccinePayload) -> Result<HttpRequest, ApiError> {
        VaccineClient::build_create(self, payload)
    }

    fn build_update(&self, id: i64, payload: &VaccinePayload) -> Result<HttpRequest, ApiError> {
        VaccineClient::build_update(self, id, payload)
    }

    fn build_delete(&self, id: i64) -> HttpRequest {
        VaccineClient::build_delete(self, id)
    }

    fn parse_list(&self, response: HttpResponse) -> Result<Vec<Vaccine>, ApiError> {
        VaccineClient::parse_list(self, response)
    }

    fn parse_saved(&self, response: HttpResponse) -> Result<Vaccine, ApiError> {
        VaccineClient::parse_create(self, response)
    }

    fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        VaccineClient::parse_delete(self, response)
    }
}
