//! Domain DTOs for the PetClub API.
//!
//! # Design
//! Pets exist in two shapes. [`Pet`] is what screens work with (Portuguese
//! species labels, `tutorId`); [`BackendPet`] is what goes over the wire
//! (`DOG`/`CAT`, `ownerId`). The `mapper` module converts between them and
//! the pets client applies it on both directions, so nothing outside the
//! client ever sees a `BackendPet`.
//!
//! Wire JSON is camelCase. Server-side timestamps are kept as strings because
//! the backend is free to send either bare dates or datetimes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Species as the screens present them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    #[default]
    Cachorro,
    Gato,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Cachorro, Species::Gato];

    /// Form/select value.
    pub fn code(self) -> &'static str {
        match self {
            Species::Cachorro => "CACHORRO",
            Species::Gato => "GATO",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Species::Cachorro => "Cachorro",
            Species::Gato => "Gato",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Species codes understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSpecies {
    Dog,
    Cat,
}

impl BackendSpecies {
    pub fn code(self) -> &'static str {
        match self {
            BackendSpecies::Dog => "DOG",
            BackendSpecies::Cat => "CAT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DOG" => Some(BackendSpecies::Dog),
            "CAT" => Some(BackendSpecies::Cat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Breed {
    Labrador,
    Poodle,
    Bulldog,
    Siamese,
    Persian,
    #[default]
    Other,
}

impl Breed {
    pub const ALL: [Breed; 6] = [
        Breed::Labrador,
        Breed::Poodle,
        Breed::Bulldog,
        Breed::Siamese,
        Breed::Persian,
        Breed::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Breed::Labrador => "LABRADOR",
            Breed::Poodle => "POODLE",
            Breed::Bulldog => "BULLDOG",
            Breed::Siamese => "SIAMESE",
            Breed::Persian => "PERSIAN",
            Breed::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.code() == code)
    }
}

/// A pet owner account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub birth_date: String,
    /// Read-only back-reference filled in by some backend queries.
    #[serde(default, skip_serializing)]
    pub pets: Vec<PetSummary>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Request payload for creating or updating a tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub birth_date: NaiveDate,
}

/// A pet in the shape screens use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub species: Species,
    pub breed: Breed,
    /// `YYYY-MM-DD` when present.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub weight: f64,
    pub tutor_id: i64,
}

/// A pet in the shape the backend speaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub species: String,
    pub breed: Breed,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub weight: f64,
    pub owner_id: i64,
}

/// A vaccination record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub pet_id: i64,
}

/// Request payload for creating or updating a vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub pet_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
