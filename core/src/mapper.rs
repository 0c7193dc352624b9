//! Conversion between the screen-side and wire-side pet shapes.
//!
//! `species` maps CACHORRO↔DOG and GATO↔CAT, `tutorId` and `ownerId` carry
//! the same value, and birth dates are normalised to bare `YYYY-MM-DD`.
//! Backend species codes outside DOG/CAT are rejected instead of being folded
//! into the cat branch.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ApiError;
use crate::types::{BackendPet, BackendSpecies, Pet, Species};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that does not parse as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {0:?}")]
pub struct InvalidDate(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error("unknown species {0:?}")]
    UnknownSpecies(String),
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::InvalidDate(e) => ApiError::InvalidDate(e),
            MappingError::UnknownSpecies(s) => ApiError::UnknownSpecies(s),
        }
    }
}

/// Parse a bare date, a naive datetime, or an RFC 3339 timestamp, keeping only
/// the calendar date.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, InvalidDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(InvalidDate(raw.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn normalize_optional(raw: &Option<String>) -> Result<Option<String>, InvalidDate> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => normalize_date(s).map(|d| Some(format_date(d))),
    }
}

pub fn species_to_backend(species: Species) -> BackendSpecies {
    match species {
        Species::Cachorro => BackendSpecies::Dog,
        Species::Gato => BackendSpecies::Cat,
    }
}

pub fn species_from_backend(code: &str) -> Result<Species, MappingError> {
    match BackendSpecies::from_code(code) {
        Some(BackendSpecies::Dog) => Ok(Species::Cachorro),
        Some(BackendSpecies::Cat) => Ok(Species::Gato),
        None => Err(MappingError::UnknownSpecies(code.to_string())),
    }
}

pub fn to_backend_pet(pet: &Pet) -> Result<BackendPet, InvalidDate> {
    Ok(BackendPet {
        id: pet.id,
        name: pet.name.clone(),
        species: species_to_backend(pet.species).code().to_string(),
        breed: pet.breed,
        birth_date: normalize_optional(&pet.birth_date)?,
        color: pet.color.clone(),
        weight: pet.weight,
        owner_id: pet.tutor_id,
    })
}

pub fn to_frontend_pet(pet: &BackendPet) -> Result<Pet, MappingError> {
    Ok(Pet {
        id: pet.id,
        name: pet.name.clone(),
        species: species_from_backend(&pet.species)?,
        breed: pet.breed,
        birth_date: normalize_optional(&pet.birth_date)?,
        color: pet.color.clone(),
        weight: pet.weight,
        tutor_id: pet.owner_id,
    })
}
