//! Headless client core for the PetClub management application.
//!
//! # Overview
//! Tutors (pet owners) sign in and manage pets and vaccination records
//! through a REST backend. This crate holds everything except the rendering
//! and the network I/O: typed DTOs, the pet field mapper, form validation,
//! per-resource request builders/response parsers, the session context, the
//! route gate, and one state machine per screen.
//!
//! # Design
//! - Host-does-IO: clients build `HttpRequest`s and parse `HttpResponse`s;
//!   screens emit [`screens::Effect`]s and take outcomes back.
//! - Pets have a screen shape and a wire shape; only the pets client and the
//!   [`mapper`] ever see the wire shape.
//! - The session is an explicit value passed to screens, backed by an
//!   injected [`session::SessionStore`].

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod mapper;
pub mod routes;
pub mod screens;
pub mod session;
pub mod types;
pub mod validate;

pub use client::{AuthClient, PetClient, ResourceClient, TutorClient, VaccineClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Outcome, TransportError};
pub use routes::{navigate, Navigation, Route};
pub use session::{MemoryStore, Session, SessionStore};
pub use types::{
    AuthResponse, BackendPet, Breed, LoginRequest, Pet, Species, Tutor, TutorPayload, User,
    Vaccine, VaccinePayload,
};
pub use validate::FieldErrors;
