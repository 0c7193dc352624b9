//! Login screen. A successful login signs the session in and moves on to
//! the pet list.

use tracing::warn;

use super::{Effect, Notice, Ticket};
use crate::client::AuthClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::form::{FormModel, LoginForm, UnknownField};
use crate::http::Outcome;
use crate::routes::Route;
use crate::session::Session;
use crate::validate::{check_login, FieldErrors};

pub struct LoginScreen {
    client: AuthClient,
    form: LoginForm,
    errors: FieldErrors,
    submitting: bool,
    notices: Vec<Notice>,
}

impl LoginScreen {
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            form: LoginForm::default(),
            errors: FieldErrors::new(),
            submitting: false,
            notices: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(AuthClient::from_config(config))
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn input(&mut self, field: &str, raw: &str) -> Result<(), UnknownField> {
        let name = self.form.set_input(field, raw)?;
        self.errors.clear(name);
        Ok(())
    }

    pub fn submit(&mut self) -> Option<Effect> {
        if self.submitting {
            return None;
        }
        let credentials = match check_login(&self.form) {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.errors = errors;
                self.notices.push(Notice::error("Please fill in every field"));
                return None;
            }
        };
        self.errors = FieldErrors::new();
        match self.client.build_login(&credentials) {
            Ok(request) => {
                self.submitting = true;
                Some(Effect::Send {
                    ticket: Ticket::Login,
                    request,
                })
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(err.user_message("Could not log in")));
                None
            }
        }
    }

    /// On success the session is signed in and the host is sent to `/pets`.
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome, session: &mut Session) -> Option<Effect> {
        if ticket != Ticket::Login || !self.submitting {
            return None;
        }
        self.submitting = false;
        let auth = outcome
            .map_err(ApiError::from)
            .and_then(|r| self.client.parse_login(r));
        match auth {
            Ok(auth) => match session.login(auth) {
                Ok(()) => {
                    self.form.password.clear();
                    self.notices.push(Notice::success("Logged in successfully!"));
                    Some(Effect::Navigate(Route::Pets))
                }
                Err(err) => {
                    warn!(error = %err, "could not persist session");
                    self.notices.push(Notice::error("Could not start the session"));
                    None
                }
            },
            Err(ApiError::Http { status: 401, .. }) => {
                self.notices.push(Notice::error("Invalid email or password"));
                None
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.notices
                    .push(Notice::error(err.user_message("Could not log in")));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::screens::NoticeLevel;
    use crate::session::MemoryStore;

    fn screen() -> LoginScreen {
        LoginScreen::new(AuthClient::new("http://localhost:8080"))
    }

    fn filled() -> LoginScreen {
        let mut screen = screen();
        screen.input("email", "ana@petclub.dev").unwrap();
        screen.input("password", "secret").unwrap();
        screen
    }

    #[test]
    fn empty_form_is_rejected_locally() {
        let mut screen = screen();
        assert!(screen.submit().is_none());
        assert_eq!(screen.errors().len(), 2);
        assert_eq!(screen.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn success_signs_in_and_navigates() {
        let mut screen = filled();
        let Some(Effect::Send { ticket, request }) = screen.submit() else {
            panic!("expected login request");
        };
        assert_eq!(request.method, HttpMethod::Post);
        assert!(screen.submit().is_none());

        let mut session = Session::new(MemoryStore::new());
        let next = screen.complete(
            ticket,
            Ok(HttpResponse::new(
                200,
                r#"{"token":"abc","user":{"id":1,"name":"Ana"}}"#,
            )),
            &mut session,
        );
        assert_eq!(next, Some(Effect::Navigate(Route::Pets)));
        assert_eq!(session.token(), Some("abc"));
        assert!(screen.form().password.is_empty());
    }

    #[test]
    fn unauthorized_keeps_user_on_login() {
        let mut screen = filled();
        let Some(Effect::Send { ticket, .. }) = screen.submit() else {
            panic!("expected login request");
        };
        let mut session = Session::new(MemoryStore::new());
        let next = screen.complete(ticket, Ok(HttpResponse::new(401, "")), &mut session);
        assert!(next.is_none());
        assert!(!session.is_authenticated());
        assert_eq!(screen.take_notices()[0].message, "Invalid email or password");
    }
}
