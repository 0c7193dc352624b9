//! Pets client. Request and response bodies go through the field mapper, so
//! callers only handle the screen-side [`Pet`] shape.

use super::{check_status, decode, Endpoint, ResourceClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::mapper::{to_backend_pet, to_frontend_pet};
use crate::types::{BackendPet, Pet};

/// Client for `/pets`.
#[derive(Debug, Clone)]
pub struct PetClient {
    endpoint: Endpoint,
}

impl PetClient {
    pub const RESOURCE: &'static str = "/pets";

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

    pub fn build_create(&self, pet: &Pet) -> Result<HttpRequest, ApiError> {
        let mut body = to_backend_pet(pet)?;
        body.id = None;
        self.endpoint
            .json(HttpMethod::Post, self.endpoint.url(""), &body)
    }

    pub fn build_update(&self, id: i64, pet: &Pet) -> Result<HttpRequest, ApiError> {
        let body = to_backend_pet(pet)?;
        self.endpoint
            .json(HttpMethod::Put, self.endpoint.url(&format!("/{id}")), &body)
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        self.endpoint
            .request(HttpMethod::Delete, self.endpoint.url(&format!("/{id}")), None)
    }

    /// `PUT /pets/{id}/name` with only the new name.
    pub fn build_update_name(&self, id: i64, name: &str) -> Result<HttpRequest, ApiError> {
        self.endpoint.json(
            HttpMethod::Put,
            self.endpoint.url(&format!("/{id}/name")),
            &serde_json::json!({ "name": name }),
        )
    }

    /// `GET /pets/search?name=<name>`
    pub fn build_search(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let url = self.endpoint.url_with_query("/search", &[("name", name)])?;
        Ok(self.endpoint.request(HttpMethod::Get, url, None))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        let pets: Vec<BackendPet> = decode(response)?;
        pets.iter()
            .map(|p| to_frontend_pet(p).map_err(ApiError::from))
            .collect()
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        let pet: BackendPet = decode(response)?;
        Ok(to_frontend_pet(&pet)?)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        self.parse_get(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        self.parse_get(response)
    }

    pub fn parse_update_name(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        self.parse_get(response)
    }

    /// A pet that is already gone counts as deleted.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        match check_status(&response) {
            Err(ApiError::NotFound) => Ok(()),
            other => other,
        }
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        self.parse_list(response)
    }
}

impl ResourceClient for PetClient {
    type Record = Pet;
    type Payload = Pet;

    fn build_list(&self) -> HttpRequest {
        PetClient::build_list(self)
    }

    fn build_create(&self, payload: &Pet) -> Result<HttpRequest, ApiError> {
        PetClient::build_create(self, payload)
    }

    fn build_update(&self, id: i64, payload: &Pet) -> Result<HttpRequest, ApiError> {
        PetClient::build_update(self, id, payload)
    }

    fn build_delete(&self, id: i64) -> HttpRequest {
        PetClient::build_delete(self, id)
    }

    fn parse_list(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        PetClient::parse_list(self, response)
    }

    fn parse_saved(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        PetClient::parse_get(self, response)
    }

    fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        PetClient::parse_delete(self, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Breed, Species};

    fn client() -> PetClient {
        PetClient::new("http://localhost:8080")
    }

    fn rex() -> Pet {
        Pet {
            id: None,
            name: "Rex".to_string(),
            species: Species::Cachorro,
            breed: Breed::Labrador,
            birth_date: Some("2020-03-04T00:00:00".to_string()),
            color: None,
            weight: 12.5,
            tutor_id: 3,
        }
    }

    #[test]
    fn build_create_sends_backend_shape() {
        let req = client().build_create(&rex()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/pets");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["species"], "DOG");
        assert_eq!(body["ownerId"], 3);
        assert_eq!(body["birthDate"], "2020-03-04");
        assert!(body.get("tutorId").is_none());
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_create_rejects_malformed_date() {
        let mut pet = rex();
        pet.birth_date = Some("yesterday".to_string());
        let err = client().build_create(&pet).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDate(_)));
    }

    #[test]
    fn build_update_targets_id() {
        let mut pet = rex();
        pet.id = Some(5);
        pet.species = Species::Gato;
        let req = client().build_update(5, &pet).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/pets/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["species"], "CAT");
    }

    #[test]
    fn rename_sends_only_the_name() {
        let req = client().build_update_name(5, "Rex II").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/pets/5/name");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Rex II" }));

        let pet = client()
            .parse_update_name(HttpResponse::new(
                200,
                r#"{"id":5,"name":"Rex II","species":"DOG","breed":"LABRADOR","weight":12.5,"ownerId":3}"#,
            ))
            .unwrap();
        assert_eq!(pet.name, "Rex II");
        assert_eq!(pet.tutor_id, 3);
    }

    #[test]
    fn build_search_uses_name_parameter() {
        let req = client().build_search("Rex").unwrap();
        assert_eq!(req.path, "http://localhost:8080/pets/search?name=Rex");
    }

    #[test]
    fn parse_list_maps_to_frontend_shape() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"name":"Rex","species":"DOG","breed":"LABRADOR","birthDate":null,"weight":12.5,"ownerId":3}]"#,
        );
        let pets = client().parse_list(response).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].species, Species::Cachorro);
        assert_eq!(pets[0].tutor_id, 3);
        assert_eq!(pets[0].birth_date, None);
    }

    #[test]
    fn parse_list_surfaces_unknown_species() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"name":"Tweety","species":"BIRD","breed":"OTHER","weight":0.1,"ownerId":3}]"#,
        );
        let err = client().parse_list(response).unwrap_err();
        assert_eq!(err, ApiError::UnknownSpecies("BIRD".to_string()));
    }

    #[test]
    fn parse_delete_not_found_is_a_no_op() {
        assert!(client().parse_delete(HttpResponse::new(404, "")).is_ok());
        assert!(client().parse_delete(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_server_error_is_reported() {
        let err = client().parse_delete(HttpResponse::new(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }
}
