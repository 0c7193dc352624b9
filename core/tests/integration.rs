//! Screen flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and plays the host: every
//! `Effect::Send` a screen emits is executed with ureq and the outcome is fed
//! back through `complete`. The guarded server rejects requests without the
//! token issued at login, so these flows also prove the session token reaches
//! every resource call.

use std::net::SocketAddr;

use petclub_core::screens::{
    Effect, EditorMode, FixedClock, LoginScreen, NoticeLevel, Phase, PetScreen, Resource, Screen,
    TutorEditor, TutorScreen, VaccineScreen,
};
use petclub_core::{
    ClientConfig, HttpMethod, HttpRequest, HttpResponse, MemoryStore, Outcome, Route, Session,
    Species, TransportError,
};

/// Execute an `HttpRequest` with ureq.
///
/// Status codes are returned as data; only failures to get any response
/// become a `TransportError`.
fn execute(req: HttpRequest) -> Outcome {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(req.timeout)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&req.path), &req.headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&req.path), &req.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&req.path), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&req.path), &req.headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&req.path), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(&req.path), &req.headers).send_empty(),
    };
    let mut response = result.map_err(|e| TransportError(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(HttpResponse::new(status, body).with_url(req.path))
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_guarded(listener).await
        })
        .unwrap();
    });
    addr
}

fn today() -> FixedClock {
    FixedClock(chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
}

/// Run effects until the screen settles. Returns the navigation, if any.
fn drive<R: Resource>(screen: &mut Screen<R>, mut effect: Option<Effect>) -> Option<Route> {
    while let Some(next) = effect.take() {
        match next {
            Effect::Send { ticket, request } => effect = screen.complete(ticket, execute(request)),
            Effect::Navigate(route) => return Some(route),
        }
    }
    None
}

fn drive_editor(editor: &mut TutorEditor, mut effect: Option<Effect>) -> Option<Route> {
    while let Some(next) = effect.take() {
        match next {
            Effect::Send { ticket, request } => effect = editor.complete(ticket, execute(request)),
            Effect::Navigate(route) => return Some(route),
        }
    }
    None
}

fn sign_in(config: &ClientConfig) -> Session {
    let mut session = Session::new(MemoryStore::new());
    let mut login = LoginScreen::from_config(config);
    login.input("email", "ana@petclub.dev").unwrap();
    login.input("password", "secret").unwrap();
    let Some(Effect::Send { ticket, request }) = login.submit() else {
        panic!("expected login request");
    };
    let next = login.complete(ticket, execute(request), &mut session);
    assert_eq!(next, Some(Effect::Navigate(Route::Pets)));
    assert!(session.is_authenticated());
    session
}

#[test]
fn tutor_pet_vaccine_lifecycle() {
    let addr = spawn_server();
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        ..ClientConfig::default()
    };

    // Step 1: unauthenticated screens bounce to login.
    let anonymous = Session::new(MemoryStore::new());
    let mut tutors = TutorScreen::for_session(&config, &anonymous, today());
    assert_eq!(tutors.mount(&anonymous), Some(Effect::Navigate(Route::Login)));

    let session = sign_in(&config);

    // Step 2: create Ana Silva through the tutor list modal.
    let mut tutors = TutorScreen::for_session(&config, &session, today());
    let effect = tutors.mount(&session);
    assert_eq!(drive(&mut tutors, effect), None);
    assert_eq!(tutors.phase(), Phase::Ready);
    assert!(tutors.records().is_empty());

    tutors.open_create();
    tutors.input("name", "Ana Silva").unwrap();
    tutors.input("birthDate", "1990-05-01").unwrap();
    let effect = tutors.submit();
    assert_eq!(drive(&mut tutors, effect), None);
    assert_eq!(tutors.records().len(), 1);
    let ana = &tutors.records()[0];
    assert_eq!(ana.name, "Ana Silva");
    assert_eq!(ana.birth_date, "1990-05-01");
    let ana_id = ana.id.unwrap();
    let notices = tutors.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);

    // Step 3: a second tutor with the same name is refused by the backend.
    let mut editor = TutorEditor::for_session(EditorMode::Create, &config, &session, today());
    assert!(editor.mount(&session).is_none());
    editor.input("name", "Ana Silva").unwrap();
    editor.input("birthDate", "1985-02-03").unwrap();
    let effect = editor.submit();
    assert_eq!(drive_editor(&mut editor, effect), None);
    assert!(editor.errors().get("name").is_some());
    assert_eq!(editor.take_notices()[0].level, NoticeLevel::Error);

    // Step 4: create Rex for Ana.
    let mut pets = PetScreen::for_session(&config, &session, today());
    let effect = pets.mount(&session);
    drive(&mut pets, effect);
    assert!(pets.records().is_empty());

    pets.open_create();
    pets.input("name", "Rex").unwrap();
    pets.input("species", "CACHORRO").unwrap();
    pets.input("breed", "LABRADOR").unwrap();
    pets.input("weight", "12.5").unwrap();
    pets.input("tutorId", &ana_id.to_string()).unwrap();
    let effect = pets.submit();
    drive(&mut pets, effect);
    assert_eq!(pets.records().len(), 1);
    let rex = &pets.records()[0];
    assert_eq!(rex.name, "Rex");
    assert_eq!(rex.species, Species::Cachorro);
    assert_eq!(rex.species.label(), "Cachorro");
    assert_eq!(rex.tutor_id, ana_id);
    let rex_id = rex.id.unwrap();

    // Step 5: record a vaccine for Rex.
    let mut vaccines = VaccineScreen::for_session(&config, &session, today());
    let effect = vaccines.mount(&session);
    drive(&mut vaccines, effect);
    vaccines.open_create();
    vaccines.input("type", "V10").unwrap();
    vaccines.input("date", "2026-01-05").unwrap();
    vaccines.input("petId", &rex_id.to_string()).unwrap();
    let effect = vaccines.submit();
    drive(&mut vaccines, effect);
    assert_eq!(vaccines.records().len(), 1);
    assert_eq!(vaccines.records()[0].pet_id, rex_id);

    // Step 6: delete Rex; the list empties and a second delete is a no-op.
    pets.request_delete(rex_id);
    let effect = pets.confirm_delete();
    drive(&mut pets, effect);
    assert!(pets.records().is_empty());
    pets.take_notices();

    pets.request_delete(rex_id);
    let effect = pets.confirm_delete();
    drive(&mut pets, effect);
    assert_eq!(pets.take_notices()[0].level, NoticeLevel::Success);

    let effect = pets.refresh();

    drive(&mut pets, effect);
    assert!(pets.records().is_empty());
}

#[test]
fn missing_token_is_refused_by_guarded_server() {
    let addr = spawn_server();
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        dev_auth: true,
        ..ClientConfig::default()
    };
    let session = Session::from_config(&config, MemoryStore::new());

    let mut tutors = TutorScreen::for_session(&config, &session, today());
    let effect = tutors.mount(&session);
    drive(&mut tutors, effect);
    assert_eq!(tutors.phase(), Phase::Ready);
    assert!(tutors.records().is_empty());
    assert_eq!(tutors.take_notices()[0].level, NoticeLevel::Error);
}

#[test]
fn unreachable_server_becomes_network_notice() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        dev_auth: true,
        ..ClientConfig::default()
    };
    let session = Session::from_config(&config, MemoryStore::new());

    let mut pets = PetScreen::for_session(&config, &session, today());
    let effect = pets.mount(&session);
    drive(&mut pets, effect);
    assert_eq!(pets.phase(), Phase::Ready);
    let notices = pets.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.starts_with("Could not reach the server"));
}
