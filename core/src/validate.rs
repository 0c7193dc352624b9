//! Form validation.
//!
//! Each `check_*` function either produces the request payload for a form or
//! the full set of field errors. `validate_*` keeps only the errors; an empty
//! map means the form is valid. Every rule writes only to its own field.
//! `today` is passed in so callers control the clock.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::form::{LoginForm, PetForm, TutorForm, VaccineForm};
use crate::mapper::{format_date, normalize_date};
use crate::types::{LoginRequest, Pet, TutorPayload, VaccinePayload};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const NICKNAME_MAX_CHARS: usize = 50;
pub const MAX_AGE_YEARS: u32 = 120;

/// Field name → message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, FieldErrors> {
        match value {
            Some(v) if self.is_empty() => Ok(v),
            _ => Err(self),
        }
    }
}

fn check_length(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
) -> Option<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        errors.insert(field, format!("{label} is required"));
    } else if len < NAME_MIN_CHARS {
        errors.insert(
            field,
            format!("{label} must be at least {NAME_MIN_CHARS} characters"),
        );
    } else if len > NAME_MAX_CHARS {
        errors.insert(
            field,
            format!("{label} cannot exceed {NAME_MAX_CHARS} characters"),
        );
    } else {
        return Some(trimmed.to_string());
    }
    None
}

fn parse_date(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match normalize_date(raw) {
        Err(_) => {
            errors.insert(field, "Invalid date");
            None
        }
        Ok(date) if date > today => {
            errors.insert(field, "Date cannot be in the future");
            None
        }
        Ok(date) => Some(date),
    }
}

pub fn check_tutor(form: &TutorForm, today: NaiveDate) -> Result<TutorPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = check_length(&mut errors, "name", "Name", &form.name);

    let nickname = form.nickname.trim();
    if nickname.chars().count() > NICKNAME_MAX_CHARS {
        errors.insert(
            "nickname",
            format!("Nickname cannot exceed {NICKNAME_MAX_CHARS} characters"),
        );
    }

    let birth_date = if form.birth_date.trim().is_empty() {
        errors.insert("birthDate", "Birth date is required");
        None
    } else {
        parse_date(&mut errors, "birthDate", &form.birth_date, today).filter(|date| {
            let oldest = today
                .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
                .unwrap_or(NaiveDate::MIN);
            let ok = *date >= oldest;
            if !ok {
                errors.insert("birthDate", "Please enter a valid birth date");
            }
            ok
        })
    };

    let payload = match (name, birth_date) {
        (Some(name), Some(birth_date)) => Some(TutorPayload {
            name,
            nickname: Some(nickname.to_string()).filter(|n| !n.is_empty()),
            birth_date,
        }),
        _ => None,
    };
    errors.into_result(payload)
}

pub fn validate_tutor(form: &TutorForm, today: NaiveDate) -> FieldErrors {
    check_tutor(form, today).err().unwrap_or_default()
}

pub fn check_vaccine(form: &VaccineForm, today: NaiveDate) -> Result<VaccinePayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    let kind = check_length(&mut errors, "type", "Vaccine type", &form.kind);

    let date = if form.date.trim().is_empty() {
        errors.insert("date", "Vaccination date is required");
        None
    } else {
        parse_date(&mut errors, "date", &form.date, today)
    };

    let pet_id = form.pet_id.filter(|id| *id != 0);
    if pet_id.is_none() {
        errors.insert("petId", "A pet must be selected");
    }

    let payload = match (kind, date, pet_id) {
        (Some(kind), Some(date), Some(pet_id)) => Some(VaccinePayload { kind, date, pet_id }),
        _ => None,
    };
    errors.into_result(payload)
}

pub fn validate_vaccine(form: &VaccineForm, today: NaiveDate) -> FieldErrors {
    check_vaccine(form, today).err().unwrap_or_default()
}

/// Produces a pet without an id; the caller attaches one when editing.
pub fn check_pet(form: &PetForm, today: NaiveDate) -> Result<Pet, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", "Name is required");
    }
    if form.breed.is_none() {
        errors.insert("breed", "Breed is required");
    }
    match form.weight {
        None => errors.insert("weight", "Weight is required"),
        Some(w) if !w.is_finite() => errors.insert("weight", "Weight must be a number"),
        Some(w) if w < 0.0 => errors.insert("weight", "Weight cannot be negative"),
        Some(_) => {}
    }
    let birth_date = if form.birth_date.trim().is_empty() {
        Some(None)
    } else {
        parse_date(&mut errors, "birthDate", &form.birth_date, today).map(Some)
    };
    let tutor_id = form.tutor_id.filter(|id| *id != 0);
    if tutor_id.is_none() {
        errors.insert("tutorId", "A tutor must be selected");
    }

    let payload = match (form.breed, form.weight, birth_date, tutor_id) {
        (Some(breed), Some(weight), Some(birth_date), Some(tutor_id)) => Some(Pet {
            id: None,
            name: name.to_string(),
            species: form.species,
            breed,
            birth_date: birth_date.map(format_date),
            color: Some(form.color.trim().to_string()).filter(|c| !c.is_empty()),
            weight,
            tutor_id,
        }),
        _ => None,
    };
    errors.into_result(payload)
}

pub fn validate_pet(form: &PetForm, today: NaiveDate) -> FieldErrors {
    check_pet(form, today).err().unwrap_or_default()
}

pub fn check_login(form: &LoginForm) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required");
    }
    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    }
    let request = LoginRequest {
        email: email.to_string(),
        password: form.password.clone(),
    };
    errors.into_result(Some(request))
}
