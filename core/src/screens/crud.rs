//! The list + modal form + delete confirmation screen shared by tutors, pets
//! and vaccines.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{Clock, Effect, Notice, Ticket, NAME_IN_USE};
use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::form::{FormModel, UnknownField};
use crate::http::Outcome;
use crate::routes::Route;
use crate::session::Session;
use crate::validate::FieldErrors;

/// What a CRUD screen needs to know about one resource.
pub trait Resource {
    type Record: Clone;
    type Payload;
    type Form: FormModel;
    type Client: ResourceClient<Record = Self::Record, Payload = Self::Payload>;

    /// Lowercase noun used in notifications, e.g. `"tutor"`.
    const NOUN: &'static str;

    fn client(config: &ClientConfig, token: Option<&str>) -> Self::Client;

    fn record_id(record: &Self::Record) -> Option<i64>;

    /// Defaults for the creation form. `user_id` is the signed-in user, if any.
    fn blank_form(user_id: Option<i64>) -> Self::Form;

    /// Pre-fill the edit form from a listed record.
    fn edit_form(record: &Self::Record) -> Self::Form;

    fn check(form: &Self::Form, today: NaiveDate) -> Result<Self::Payload, FieldErrors>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Creating,
    Editing(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirm {
    None,
    Pending(i64),
}

pub struct Screen<R: Resource> {
    client: R::Client,
    clock: Box<dyn Clock>,
    user_id: Option<i64>,
    phase: Phase,
    records: Vec<R::Record>,
    modal: Modal,
    form: R::Form,
    errors: FieldErrors,
    confirm: DeleteConfirm,
    deleting: Option<i64>,
    /// The save this screen's open form is waiting on.
    saving: Option<Ticket>,
    /// A save landed while a list fetch was in flight; that fetch is stale.
    list_dirty: bool,
    notices: Vec<Notice>,
}

impl<R: Resource> Screen<R> {
    pub fn new(client: R::Client, clock: impl Clock + 'static) -> Self {
        Self {
            client,
            clock: Box::new(clock),
            user_id: None,
            phase: Phase::Idle,
            records: Vec::new(),
            modal: Modal::Closed,
            form: R::blank_form(None),
            errors: FieldErrors::new(),
            confirm: DeleteConfirm::None,
            deleting: None,
            saving: None,
            list_dirty: false,
            notices: Vec::new(),
        }
    }

    /// Build the screen with a client carrying the session's token.
    pub fn for_session(config: &ClientConfig, session: &Session, clock: impl Clock + 'static) -> Self {
        Self::new(R::client(config, session.token()), clock)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn delete_confirm(&self) -> DeleteConfirm {
        self.confirm
    }

    /// Row whose delete call is in flight.
    pub fn deleting(&self) -> Option<i64> {
        self.deleting
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Session check, then the initial list fetch.
    pub fn mount(&mut self, session: &Session) -> Option<Effect> {
        if !session.is_authenticated() {
            return Some(Effect::Navigate(Route::Login));
        }
        self.user_id = session.user().map(|u| u.id);
        self.form = R::blank_form(self.user_id);
        self.refresh()
    }

    /// Re-fetch the list unless a fetch is already in flight.
    pub fn refresh(&mut self) -> Option<Effect> {
        if self.phase == Phase::Loading {
            return None;
        }
        self.phase = Phase::Loading;
        Some(Effect::Send {
            ticket: Ticket::List,
            request: self.client.build_list(),
        })
    }

    pub fn open_create(&mut self) {
        self.reset_form();
        self.modal = Modal::Creating;
    }

    /// Open the edit form for a listed record. Returns `false` if `id` is not
    /// in the current list.
    pub fn open_edit(&mut self, id: i64) -> bool {
        let Some(record) = self.records.iter().find(|r| R::record_id(r) == Some(id)) else {
            return false;
        };
        self.form = R::edit_form(record);
        self.errors = FieldErrors::new();
        self.saving = None;
        self.modal = Modal::Editing(id);
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.reset_form();
    }

    /// Store raw input for `field` and clear its error.
    pub fn input(&mut self, field: &str, raw: &str) -> Result<(), UnknownField> {
        let name = self.form.set_input(field, raw)?;
        self.errors.clear(name);
        Ok(())
    }

    /// Validate and, if the form is clean, emit the create or update call.
    pub fn submit(&mut self) -> Option<Effect> {
        let payload = match R::check(&self.form, self.clock.today()) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(resource = R::NOUN, fields = errors.len(), "form rejected");
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::new();
        let built = match self.modal {
            Modal::Closed => return None,
            Modal::Creating => self
                .client
                .build_create(&payload)
                .map(|request| (Ticket::Create, request)),
            Modal::Editing(id) => self
                .client
                .build_update(id, &payload)
                .map(|request| (Ticket::Update(id), request)),
        };
        match built {
            Ok((ticket, request)) => {
                self.saving = Some(ticket);
                Some(Effect::Send { ticket, request })
            }
            Err(err) => {
                self.save_failed(err);
                None
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.confirm = DeleteConfirm::Pending(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = DeleteConfirm::None;
    }

    /// Fire the delete awaiting confirmation. Only one delete runs at a time.
    pub fn confirm_delete(&mut self) -> Option<Effect> {
        let DeleteConfirm::Pending(id) = self.confirm else {
            return None;
        };
        if self.deleting.is_some() {
            return None;
        }
        self.confirm = DeleteConfirm::None;
        self.deleting = Some(id);
        Some(Effect::Send {
            ticket: Ticket::Delete(id),
            request: self.client.build_delete(id),
        })
    }

    /// Feed back the outcome of a request this screen emitted.
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Effect> {
        let response = outcome.map_err(ApiError::from);
        match ticket {
            Ticket::List => {
                if self.phase != Phase::Loading {
                    debug!(resource = R::NOUN, "discarding stale list response");
                    return None;
                }
                if self.list_dirty {
                    debug!(resource = R::NOUN, "list changed while loading, fetching again");
                    self.list_dirty = false;
                    self.phase = Phase::Idle;
                    return self.refresh();
                }
                self.phase = Phase::Ready;
                match response.and_then(|r| self.client.parse_list(r)) {
                    Ok(records) => self.records = records,
                    Err(err) => {
                        warn!(resource = R::NOUN, error = %err, "list fetch failed");
                        self.records.clear();
                        let fallback = format!("Could not load the {} list", R::NOUN);
                        self.notices.push(Notice::error(err.user_message(&fallback)));
                    }
                }
                None
            }
            Ticket::Create | Ticket::Update(_) if self.saving != Some(ticket) => {
                debug!(resource = R::NOUN, ?ticket, "save finished after its form closed");
                match response.and_then(|r| self.client.parse_saved(r)) {
                    Ok(_) => self.reload(),
                    Err(_) => None,
                }
            }
            Ticket::Create | Ticket::Update(_) => {
                self.saving = None;
                match response.and_then(|r| self.client.parse_saved(r)) {
                    Ok(_) => {
                        let verb = if ticket == Ticket::Create { "created" } else { "updated" };
                        self.notices
                            .push(Notice::success(format!("{} {verb} successfully!", title(R::NOUN))));
                        self.close_modal();
                        self.reload()
                    }
                    Err(err) => {
                        self.save_failed(err);
                        None
                    }
                }
            }
            Ticket::Delete(id) => {
                if self.deleting != Some(id) {
                    debug!(resource = R::NOUN, id, "discarding stale delete response");
                    return None;
                }
                self.deleting = None;
                match response.and_then(|r| self.client.parse_delete(r)) {
                    Ok(()) => {
                        self.records.retain(|r| R::record_id(r) != Some(id));
                        if self.phase == Phase::Loading {
                            self.list_dirty = true;
                        }
                        self.notices
                            .push(Notice::success(format!("{} deleted successfully!", title(R::NOUN))));
                    }
                    Err(err) => {
                        warn!(resource = R::NOUN, id, error = %err, "delete failed");
                        let fallback = format!("Could not delete the {}. Please try again.", R::NOUN);
                        self.notices.push(Notice::error(err.user_message(&fallback)));
                    }
                }
                None
            }
            Ticket::Fetch(_) | Ticket::Login => None,
        }
    }

    fn save_failed(&mut self, err: ApiError) {
        warn!(resource = R::NOUN, error = %err, "save failed");
        if matches!(err, ApiError::DuplicateName(_)) {
            self.errors.insert("name", NAME_IN_USE);
        }
        let fallback = format!("Could not save the {}. Please try again.", R::NOUN);
        self.notices.push(Notice::error(err.user_message(&fallback)));
    }

    /// Re-fetch after a change; a fetch already in flight is refetched when
    /// it lands.
    fn reload(&mut self) -> Option<Effect> {
        if self.phase == Phase::Loading {
            self.list_dirty = true;
            return None;
        }
        self.refresh()
    }

    fn reset_form(&mut self) {
        self.form = R::blank_form(self.user_id);
        self.errors = FieldErrors::new();
        self.saving = None;
    }
}

fn title(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
