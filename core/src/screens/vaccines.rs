//! Vaccination record list screen.

use chrono::NaiveDate;

use super::{Resource, Screen};
use crate::client::VaccineClient;
use crate::config::ClientConfig;
use crate::form::VaccineForm;
use crate::mapper::{format_date, normalize_date};
use crate::types::{Vaccine, VaccinePayload};
use crate::validate::{check_vaccine, FieldErrors};

pub struct Vaccines;

pub type VaccineScreen = Screen<Vaccines>;

impl Resource for Vaccines {
    type Record = Vaccine;
    type Payload = VaccinePayload;
    type Form = VaccineForm;
    type Client = VaccineClient;

    const NOUN: &'static str = "vaccine";

    fn client(config: &ClientConfig, token: Option<&str>) -> VaccineClient {
        VaccineClient::from_config(config, token)
    }

    fn record_id(record: &Vaccine) -> Option<i64> {
        record.id
    }

    fn blank_form(_user_id: Option<i64>) -> VaccineForm {
        VaccineForm::default()
    }

    fn edit_form(vaccine: &Vaccine) -> VaccineForm {
        VaccineForm {
            kind: vaccine.kind.clone(),
            date: normalize_date(&vaccine.date)
                .map(format_date)
                .unwrap_or_else(|_| vaccine.date.clone()),
            pet_id: Some(vaccine.pet_id).filter(|id| *id != 0),
        }
    }

    fn check(form: &VaccineForm, today: NaiveDate) -> Result<VaccinePayload, FieldErrors> {
        check_vaccine(form, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::screens::{Effect, FixedClock, Modal};
    use crate::session::{MemoryStore, Session};

    fn loaded() -> VaccineScreen {
        let session = Session::new(MemoryStore::new()).with_dev_auth(true);
        let mut screen = VaccineScreen::for_session(
            &ClientConfig::default(),
            &session,
            FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()),
        );
        let Some(Effect::Send { ticket, .. }) = screen.mount(&session) else {
            panic!("expected list fetch");
        };
        screen.complete(
            ticket,
            Ok(HttpResponse::new(
                200,
                r#"[{"id":2,"type":"V10","date":"2025-01-05T10:00:00","petId":4}]"#,
            )),
        );
        screen
    }

    #[test]
    fn future_date_is_rejected_before_any_request() {
        let mut screen = loaded();
        screen.open_create();
        screen.input("type", "Rabies").unwrap();
        screen.input("date", "2026-10-19").unwrap();
        screen.input("petId", "4").unwrap();
        assert!(screen.submit().is_none());
        assert_eq!(screen.errors().get("date"), Some("Date cannot be in the future"));
        assert_eq!(screen.modal(), Modal::Creating);
    }

    #[test]
    fn today_is_accepted() {
        let mut screen = loaded();
        screen.open_create();
        screen.input("type", "Rabies").unwrap();
        screen.input("date", "2026-10-18").unwrap();
        screen.input("petId", "4").unwrap();
        assert!(matches!(screen.submit(), Some(Effect::Send { .. })));
    }

    #[test]
    fn edit_normalizes_date() {
        let mut screen = loaded();
        assert!(screen.open_edit(2));
        assert_eq!(screen.form().date, "2025-01-05");
        assert_eq!(screen.form().pet_id, Some(4));
    }
}
