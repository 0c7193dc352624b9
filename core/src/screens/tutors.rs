//! Tutor screens: the list with its modal form, and the full-page editor
//! behind `/register`, `/tutors/new` and `/tutors/edit/{id}`.

use chrono::NaiveDate;
use tracing::warn;

use super::{Clock, Effect, Notice, Resource, Screen, Ticket, NAME_IN_USE};
use crate::client::TutorClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::form::{FormModel, TutorForm, UnknownField};
use crate::http::Outcome;
use crate::mapper::{format_date, normalize_date};
use crate::routes::Route;
use crate::session::Session;
use crate::types::{Tutor, TutorPayload};
use crate::validate::{check_tutor, FieldErrors};

pub struct Tutors;

pub type TutorScreen = Screen<Tutors>;

impl Resource for Tutors {
    type Record = Tutor;
    type Payload = TutorPayload;
    type Form = TutorForm;
    type Client = TutorClient;

    const NOUN: &'static str = "tutor";

    fn client(config: &ClientConfig, token: Option<&str>) -> TutorClient {
        TutorClient::from_config(config, token)
    }

    fn record_id(record: &Tutor) -> Option<i64> {
        record.id
    }

    fn blank_form(_user_id: Option<i64>) -> TutorForm {
        TutorForm::default()
    }

    fn edit_form(record: &Tutor) -> TutorForm {
        tutor_form(record)
    }

    fn check(form: &TutorForm, today: NaiveDate) -> Result<TutorPayload, FieldErrors> {
        check_tutor(form, today)
    }
}

fn tutor_form(tutor: &Tutor) -> TutorForm {
    TutorForm {
        name: tutor.name.clone(),
        nickname: tutor.nickname.clone().unwrap_or_default(),
        birth_date: bare_date(&tutor.birth_date),
    }
}

/// `YYYY-MM-DD` for the date input; unparseable values are left for the
/// validator to flag.
fn bare_date(raw: &str) -> String {
    normalize_date(raw)
        .map(format_date)
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Public sign-up at `/register`.
    Register,
    /// `/tutors/new`
    Create,
    /// `/tutors/edit/{id}`
    Edit(i64),
}

impl EditorMode {
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::Register => Some(EditorMode::Register),
            Route::TutorNew => Some(EditorMode::Create),
            Route::TutorEdit(id) => Some(EditorMode::Edit(id)),
            _ => None,
        }
    }
}

/// Full-page tutor form for registration, creation and editing.
pub struct TutorEditor {
    client: TutorClient,
    clock: Box<dyn Clock>,
    mode: EditorMode,
    form: TutorForm,
    errors: FieldErrors,
    loading: bool,
    saving: bool,
    notices: Vec<Notice>,
}

impl TutorEditor {
    pub fn new(mode: EditorMode, client: TutorClient, clock: impl Clock + 'static) -> Self {
        Self {
            client,
            clock: Box::new(clock),
            mode,
            form: TutorForm::default(),
            errors: FieldErrors::new(),
            loading: false,
            saving: false,
            notices: Vec::new(),
        }
    }

    pub fn for_session(
        mode: EditorMode,
        config: &ClientConfig,
        session: &Session,
        clock: impl Clock + 'static,
    ) -> Self {
        Self::new(mode, TutorClient::from_config(config, session.token()), clock)
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &TutorForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Registration is public; the other modes need a session. Editing
    /// starts by fetching the tutor.
    pub fn mount(&mut self, session: &Session) -> Option<Effect> {
        if self.mode != EditorMode::Register && !session.is_authenticated() {
            return Some(Effect::Navigate(Route::Login));
        }
        let EditorMode::Edit(id) = self.mode else {
            return None;
        };
        self.loading = true;
        Some(Effect::Send {
            ticket: Ticket::Fetch(id),
            request: self.client.build_get(id),
        })
    }

    pub fn input(&mut self, field: &str, raw: &str) -> Result<(), UnknownField> {
        let name = self.form.set_input(field, raw)?;
        self.errors.clear(name);
        Ok(())
    }

    pub fn submit(&mut self) -> Option<Effect> {
        if self.saving || self.loading {
            return None;
        }
        let payload = match check_tutor(&self.form, self.clock.today()) {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::new();
        let built = match self.mode {
            EditorMode::Register | EditorMode::Create => self
                .client
                .build_create(&payload)
                .map(|request| (Ticket::Create, request)),
            EditorMode::Edit(id) => self
                .client
                .build_update(id, &payload)
                .map(|request| (Ticket::Update(id), request)),
        };
        match built {
            Ok((ticket, request)) => {
                self.saving = true;
                Some(Effect::Send { ticket, request })
            }
            Err(err) => {
                self.save_failed(err);
                None
            }
        }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Effect> {
        let response = outcome.map_err(ApiError::from);
        match ticket {
            Ticket::Fetch(id) if self.loading && self.mode == EditorMode::Edit(id) => {
                self.loading = false;
                match response.and_then(|r| self.client.parse_get(r)) {
                    Ok(tutor) => {
                        self.form = tutor_form(&tutor);
                        None
                    }
                    Err(err) => {
                        warn!(id, error = %err, "could not load tutor");
                        self.notices
                            .push(Notice::error(err.user_message("Could not load the tutor")));
                        Some(Effect::Navigate(Route::Tutors))
                    }
                }
            }
            Ticket::Create | Ticket::Update(_) if self.saving => {
                self.saving = false;
                match response.and_then(|r| self.client.parse_create(r)) {
                    Ok(_) => Some(self.saved()),
                    Err(err) => {
                        self.save_failed(err);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn saved(&mut self) -> Effect {
        match self.mode {
            EditorMode::Register => {
                self.notices.push(Notice::success(
                    "Registration complete! Log in to continue.",
                ));
                Effect::Navigate(Route::Login)
            }
            EditorMode::Create => {
                self.notices.push(Notice::success("Tutor created successfully!"));
                Effect::Navigate(Route::Tutors)
            }
            EditorMode::Edit(_) => {
                self.notices.push(Notice::success("Tutor updated successfully!"));
                Effect::Navigate(Route::Tutors)
            }
        }
    }

    fn save_failed(&mut self, err: ApiError) {
        warn!(error = %err, "tutor save failed");
        if matches!(err, ApiError::DuplicateName(_)) {
            self.errors.insert("name", NAME_IN_USE);
        }
        self.notices.push(Notice::error(
            err.user_message("Could not save the tutor. Please try again."),
        ));
    }
}
