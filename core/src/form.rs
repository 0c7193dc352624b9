//! Form models and typed input coercion.
//!
//! Raw input always arrives as a string keyed by field name. Each form
//! declares a table of [`FieldSpec`]s saying how that string becomes a
//! [`FieldValue`]; the form then stores the typed value. Text fields with a
//! maximum length are truncated on input, the way the edit boxes behave.

use crate::types::{Breed, Species};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_chars: Option<usize> },
    /// Kept as the raw `YYYY-MM-DD` text so validation can report bad input.
    Date,
    Number,
    Integer,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(String),
    Number(Option<f64>),
    Integer(Option<i64>),
    Enum(Option<&'static str>),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("form has no field named {0:?}")]
pub struct UnknownField(pub String);

pub fn coerce(kind: FieldKind, raw: &str) -> FieldValue {
    match kind {
        FieldKind::Text { max_chars } => FieldValue::Text(match max_chars {
            Some(max) => raw.chars().take(max).collect(),
            None => raw.to_string(),
        }),
        FieldKind::Date => FieldValue::Date(raw.trim().to_string()),
        FieldKind::Number => {
            FieldValue::Number(raw.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        }
        FieldKind::Integer => {
            FieldValue::Integer(raw.trim().parse::<i64>().ok().filter(|n| *n != 0))
        }
        FieldKind::Enum(options) => {
            FieldValue::Enum(options.iter().copied().find(|o| *o == raw.trim()))
        }
    }
}

/// A form whose fields can be set from raw string input.
pub trait FormModel: Default + Clone {
    const FIELDS: &'static [FieldSpec];

    /// Store an already-coerced value. Values whose variant does not match
    /// the field are ignored.
    fn apply(&mut self, field: &'static str, value: FieldValue);

    /// Coerce `raw` through the field table and store it. Returns the
    /// canonical field name so callers can clear its error.
    fn set_input(&mut self, name: &str, raw: &str) -> Result<&'static str, UnknownField> {
        let spec = Self::FIELDS
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| UnknownField(name.to_string()))?;
        self.apply(spec.name, coerce(spec.kind, raw));
        Ok(spec.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorForm {
    pub name: String,
    pub nickname: String,
    pub birth_date: String,
}

impl FormModel for TutorForm {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", FieldKind::Text { max_chars: Some(100) }),
        field("nickname", FieldKind::Text { max_chars: Some(50) }),
        field("birthDate", FieldKind::Date),
    ];

    fn apply(&mut self, field: &'static str, value: FieldValue) {
        match (field, value) {
            ("name", FieldValue::Text(v)) => self.name = v,
            ("nickname", FieldValue::Text(v)) => self.nickname = v,
            ("birthDate", FieldValue::Date(v)) => self.birth_date = v,
            _ => {}
        }
    }
}

const SPECIES_CODES: &[&str] = &["CACHORRO", "GATO"];
const BREED_CODES: &[&str] = &["LABRADOR", "POODLE", "BULLDOG", "SIAMESE", "PERSIAN", "OTHER"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub species: Species,
    pub breed: Option<Breed>,
    pub birth_date: String,
    pub color: String,
    pub weight: Option<f64>,
    pub tutor_id: Option<i64>,
}

impl FormModel for PetForm {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", FieldKind::Text { max_chars: Some(100) }),
        field("species", FieldKind::Enum(SPECIES_CODES)),
        field("breed", FieldKind::Enum(BREED_CODES)),
        field("birthDate", FieldKind::Date),
        field("color", FieldKind::Text { max_chars: Some(50) }),
        field("weight", FieldKind::Number),
        field("tutorId", FieldKind::Integer),
    ];

    fn apply(&mut self, field: &'static str, value: FieldValue) {
        match (field, value) {
            ("name", FieldValue::Text(v)) => self.name = v,
            ("species", FieldValue::Enum(v)) => {
                if let Some(species) = v.and_then(Species::from_code) {
                    self.species = species;
                }
            }
            ("breed", FieldValue::Enum(v)) => self.breed = v.and_then(Breed::from_code),
            ("birthDate", FieldValue::Date(v)) => self.birth_date = v,
            ("color", FieldValue::Text(v)) => self.color = v,
            ("weight", FieldValue::Number(v)) => self.weight = v,
            ("tutorId", FieldValue::Integer(v)) => self.tutor_id = v,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaccineForm {
    pub kind: String,
    pub date: String,
    pub pet_id: Option<i64>,
}

impl FormModel for VaccineForm {
    const FIELDS: &'static [FieldSpec] = &[
        field("type", FieldKind::Text { max_chars: Some(100) }),
        field("date", FieldKind::Date),
        field("petId", FieldKind::Integer),
    ];

    fn apply(&mut self, field: &'static str, value: FieldValue) {
        match (field, value) {
            ("type", FieldValue::Text(v)) => self.kind = v,
            ("date", FieldValue::Date(v)) => self.date = v,
            ("petId", FieldValue::Integer(v)) => self.pet_id = v,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    const FIELDS: &'static [FieldSpec] = &[
        field("email", FieldKind::Text { max_chars: None }),
        field("password", FieldKind::Text { max_chars: None }),
    ];

    fn apply(&mut self, field: &'static str, value: FieldValue) {
        match (field, value) {
            ("email", FieldValue::Text(v)) => self.email = v,
            ("password", FieldValue::Text(v)) => self.password = v,
            _ => {}
        }
    }
}
