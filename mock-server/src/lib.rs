//! In-memory PetClub backend used for integration tests and local runs.
//!
//! Speaks the backend's wire shapes (`DOG`/`CAT`, `ownerId`) and mirrors its
//! error behaviour: duplicate tutor names are rejected with a plain-text 400,
//! other validation failures with a JSON `{"message": ...}` body.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const DUPLICATE_TUTOR_NAME: &str = "Já existe um tutor com esse nome";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub birth_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorInput {
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub birth_date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub weight: f64,
    pub owner_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetInput {
    pub name: String,
    pub species: String,
    pub breed: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub weight: f64,
    pub owner_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub pet_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub pet_id: i64,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    tutors: BTreeMap<i64, Tutor>,
    pets: BTreeMap<i64, Pet>,
    vaccines: BTreeMap<i64, Vaccine>,
    tokens: HashSet<String>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    require_auth: bool,
}

pub enum ApiError {
    NotFound,
    Unauthorized,
    BadRequest(String),
    DuplicateName,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": "Invalid credentials" })),
            )
                .into_response(),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            ApiError::DuplicateName => {
                (StatusCode::BAD_REQUEST, DUPLICATE_TUTOR_NAME).into_response()
            }
        }
    }
}

/// Every route open; tokens are issued but not checked.
pub fn app() -> Router {
    build(false)
}

/// Resource routes require a bearer token issued by `POST /login`.
pub fn app_with_auth() -> Router {
    build(true)
}

fn build(require_auth: bool) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        require_auth,
    };
    let resources = Router::new()
        .route("/tutores", get(list_tutors).post(create_tutor))
        .route("/tutores/search", get(search_tutors))
        .route(
            "/tutores/{id}",
            get(get_tutor).put(update_tutor).delete(delete_tutor),
        )
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/search", get(search_pets))
        .route("/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .route("/pets/{id}/name", put(rename_pet))
        .route("/vacinas", get(list_vaccines).post(create_vaccine))
        .route(
            "/vacinas/{id}",
            get(get_vaccine).put(update_vaccine).delete(delete_vaccine),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));
    Router::new()
        .route("/login", post(login))
        .merge(resources)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_guarded(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_auth()).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.require_auth {
        let token = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let known = match token {
            Some(token) => state.db.read().await.tokens.contains(token),
            None => false,
        };
        if !known {
            return Err(ApiError::Unauthorized);
        }
    }
    Ok(next.run(request).await)
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::Unauthorized);
    }
    let token = Uuid::new_v4().to_string();
    state.db.write().await.tokens.insert(token.clone());
    let name = input
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();
    tracing::info!(email = %input.email, "login");
    Ok(Json(AuthResponse {
        token,
        user: User {
            id: 1,
            name,
            email: input.email,
        },
    }))
}

/// Accepts `YYYY-MM-DD`, a naive datetime, or RFC 3339.
fn check_date(raw: &str) -> Result<(), ApiError> {
    let valid = NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || DateTime::parse_from_rfc3339(raw).is_ok();
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Data inválida: {raw}")))
    }
}

// --- tutors ---

#[derive(Deserialize)]
struct TutorSearch {
    nome: String,
}

fn name_taken(store: &Store, name: &str, except: Option<i64>) -> bool {
    store
        .tutors
        .values()
        .any(|t| Some(t.id) != except && t.name.eq_ignore_ascii_case(name.trim()))
}

async fn list_tutors(State(state): State<AppState>) -> Json<Vec<Tutor>> {
    Json(state.db.read().await.tutors.values().cloned().collect())
}

async fn search_tutors(
    State(state): State<AppState>,
    Query(q): Query<TutorSearch>,
) -> Json<Vec<Tutor>> {
    let needle = q.nome.to_lowercase();
    let store = state.db.read().await;
    Json(
        store
            .tutors
            .values()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

async fn get_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tutor>, ApiError> {
    let store = state.db.read().await;
    store.tutors.get(&id).cloned().map(Json).ok_or(ApiError::NotFound)
}

async fn create_tutor(
    State(state): State<AppState>,
    Json(input): Json<TutorInput>,
) -> Result<(StatusCode, Json<Tutor>), ApiError> {
    check_date(&input.birth_date)?;
    let mut store = state.db.write().await;
    if name_taken(&store, &input.name, None) {
        return Err(ApiError::DuplicateName);
    }
    let tutor = Tutor {
        id: store.next_id(),
        name: input.name.trim().to_string(),
        nickname: input.nickname,
        birth_date: input.birth_date,
    };
    store.tutors.insert(tutor.id, tutor.clone());
    Ok((StatusCode::CREATED, Json(tutor)))
}

async fn update_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TutorInput>,
) -> Result<Json<Tutor>, ApiError> {
    check_date(&input.birth_date)?;
    let mut store = state.db.write().await;
    if !store.tutors.contains_key(&id) {
        return Err(ApiError::NotFound);
    }
    if name_taken(&store, &input.name, Some(id)) {
        return Err(ApiError::DuplicateName);
    }
    let tutor = Tutor {
        id,
        name: input.name.trim().to_string(),
        nickname: input.nickname,
        birth_date: input.birth_date,
    };
    store.tutors.insert(id, tutor.clone());
    Ok(Json(tutor))
}

/// Removes the tutor's pets and their vaccines too.
async fn delete_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    store.tutors.remove(&id).ok_or(ApiError::NotFound)?;
    let orphans: HashSet<i64> = store
        .pets
        .values()
        .filter(|p| p.owner_id == id)
        .map(|p| p.id)
        .collect();
    store.pets.retain(|pid, _| !orphans.contains(pid));
    store.vaccines.retain(|_, v| !orphans.contains(&v.pet_id));
    Ok(StatusCode::NO_CONTENT)
}

// --- pets ---

#[derive(Deserialize)]
struct PetSearch {
    name: String,
}

fn check_pet(store: &Store, input: &PetInput) -> Result<(), ApiError> {
    if !matches!(input.species.as_str(), "DOG" | "CAT") {
        return Err(ApiError::BadRequest(format!(
            "Espécie inválida: {}",
            input.species
        )));
    }
    if input.weight < 0.0 {
        return Err(ApiError::BadRequest("Peso não pode ser negativo".to_string()));
    }
    if let Some(date) = &input.birth_date {
        check_date(date)?;
    }
    if !store.tutors.contains_key(&input.owner_id) {
        return Err(ApiError::BadRequest(format!(
            "Tutor {} não encontrado",
            input.owner_id
        )));
    }
    Ok(())
}

fn pet_from(id: i64, input: PetInput) -> Pet {
    Pet {
        id,
        name: input.name,
        species: input.species,
        breed: input.breed,
        birth_date: input.birth_date,
        color: input.color,
        weight: input.weight,
        owner_id: input.owner_id,
    }
}

async fn list_pets(State(state): State<AppState>) -> Json<Vec<Pet>> {
    Json(state.db.read().await.pets.values().cloned().collect())
}

async fn search_pets(State(state): State<AppState>, Query(q): Query<PetSearch>) -> Json<Vec<Pet>> {
    let needle = q.name.to_lowercase();
    let store = state.db.read().await;
    Json(
        store
            .pets
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

async fn get_pet(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Pet>, ApiError> {
    let store = state.db.read().await;
    store.pets.get(&id).cloned().map(Json).ok_or(ApiError::NotFound)
}

async fn create_pet(
    State(state): State<AppState>,
    Json(input): Json<PetInput>,
) -> Result<(StatusCode, Json<Pet>), ApiError> {
    let mut store = state.db.write().await;
    check_pet(&store, &input)?;
    let pet = pet_from(store.next_id(), input);
    store.pets.insert(pet.id, pet.clone());
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PetInput>,
) -> Result<Json<Pet>, ApiError> {
    let mut store = state.db.write().await;
    if !store.pets.contains_key(&id) {
        return Err(ApiError::NotFound);
    }
    check_pet(&store, &input)?;
    let pet = pet_from(id, input);
    store.pets.insert(id, pet.clone());
    Ok(Json(pet))
}

#[derive(Deserialize)]
pub struct PetName {
    pub name: String,
}

async fn rename_pet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PetName>,
) -> Result<Json<Pet>, ApiError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Nome é obrigatório".to_string()));
    }
    let mut store = state.db.write().await;
    let pet = store.pets.get_mut(&id).ok_or(ApiError::NotFound)?;
    pet.name = name.to_string();
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    store.pets.remove(&id).ok_or(ApiError::NotFound)?;
    store.vaccines.retain(|_, v| v.pet_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- vaccines ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaccineFilter {
    pet_id: Option<i64>,
}

fn check_vaccine(store: &Store, input: &VaccineInput) -> Result<(), ApiError> {
    if input.kind.trim().is_empty() {
        return Err(ApiError::BadRequest("Tipo é obrigatório".to_string()));
    }
    check_date(&input.date)?;
    if !store.pets.contains_key(&input.pet_id) {
        return Err(ApiError::BadRequest(format!(
            "Pet {} não encontrado",
            input.pet_id
        )));
    }
    Ok(())
}

async fn list_vaccines(
    State(state): State<AppState>,
    Query(filter): Query<VaccineFilter>,
) -> Json<Vec<Vaccine>> {
    let store = state.db.read().await;
    Json(
        store
            .vaccines
            .values()
            .filter(|v| filter.pet_id.is_none_or(|pid| v.pet_id == pid))
            .cloned()
            .collect(),
    )
}

async fn get_vaccine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vaccine>, ApiError> {
    let store = state.db.read().await;
    store.vaccines.get(&id).cloned().map(Json).ok_or(ApiError::NotFound)
}

async fn create_vaccine(
    State(state): State<AppState>,
    Json(input): Json<VaccineInput>,
) -> Result<(StatusCode, Json<Vaccine>), ApiError> {
    let mut store = state.db.write().await;
    check_vaccine(&store, &input)?;
    let vaccine = Vaccine {
        id: store.next_id(),
        kind: input.kind,
        date: input.date,
        pet_id: input.pet_id,
    };
    store.vaccines.insert(vaccine.id, vaccine.clone());
    Ok((StatusCode::CREATED, Json(vaccine)))
}

async fn update_vaccine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<VaccineInput>,
) -> Result<Json<Vaccine>, ApiError> {
    let mut store = state.db.write().await;
    if !store.vaccines.contains_key(&id) {
        return Err(ApiError::NotFound);
    }
    check_vaccine(&store, &input)?;
    let vaccine = Vaccine {
        id,
        kind: input.kind,
        date: input.date,
        pet_id: input.pet_id,
    };
    store.vaccines.insert(id, vaccine.clone());
    Ok(Json(vaccine))
}

async fn delete_vaccine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.db.write().await;
    store
        .vaccines
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::NotFound)
}
