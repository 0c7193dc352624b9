//! Per-screen state machines.
//!
//! # Design
//! Screens never perform I/O. User actions return an [`Effect`]: either a
//! request for the host to execute, tagged with a [`Ticket`], or a navigation.
//! The host hands the outcome back through the screen's `complete` method
//! together with the same ticket. A screen ignores outcomes it is no longer
//! waiting for, so a late response after the user moved on changes nothing.
//!
//! Failures never escape a screen; they become [`Notice`]s the host drains
//! with `take_notices` and shows however it likes.

mod crud;
mod login;
mod pets;
mod tutors;
mod vaccines;

use chrono::NaiveDate;

use crate::http::HttpRequest;
use crate::routes::Route;

pub use crud::{DeleteConfirm, Modal, Phase, Resource, Screen};
pub use login::LoginScreen;
pub use pets::{PetScreen, Pets};
pub use tutors::{EditorMode, TutorEditor, TutorScreen, Tutors};
pub use vaccines::{VaccineScreen, Vaccines};

/// Identifies which in-flight request an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    List,
    Fetch(i64),
    Create,
    Update(i64),
    Delete(i64),
    Login,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send { ticket: Ticket, request: HttpRequest },
    Navigate(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

const NAME_IN_USE: &str = "This name is already in use. Please choose another.";
