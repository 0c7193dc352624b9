//! Route table and session gate.

use std::fmt;

use tracing::debug;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Pets,
    Tutors,
    TutorNew,
    TutorEdit(i64),
    Vaccines,
}

impl Route {
    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["pets"] => Some(Route::Pets),
            ["tutors"] => Some(Route::Tutors),
            ["tutors", "new"] => Some(Route::TutorNew),
            ["tutors", "edit", id] => id.parse().ok().map(Route::TutorEdit),
            ["vaccines"] => Some(Route::Vaccines),
            _ => None,
        }
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Register => f.write_str("/register"),
            Route::Pets => f.write_str("/pets"),
            Route::Tutors => f.write_str("/tutors"),
            Route::TutorNew => f.write_str("/tutors/new"),
            Route::TutorEdit(id) => write!(f, "/tutors/edit/{id}"),
            Route::Vaccines => f.write_str("/vaccines"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Decide what navigating to `path` shows. The root, unknown paths, and
/// protected routes without a session all land on the login screen.
pub fn navigate(path: &str, session: &Session) -> Navigation {
    match Route::parse(path) {
        Some(route) if route.requires_session() && !session.is_authenticated() => {
            debug!(%route, "no session, redirecting to login");
            Navigation::Redirect(Route::Login)
        }
        Some(route) => Navigation::Render(route),
        None => Navigation::Redirect(Route::Login),
    }
}
