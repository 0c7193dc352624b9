//! Pet list screen. New pets default to the signed-in user as tutor.

use chrono::NaiveDate;

use super::{Resource, Screen};
use crate::client::PetClient;
use crate::config::ClientConfig;
use crate::form::PetForm;
use crate::types::Pet;
use crate::validate::{check_pet, FieldErrors};

pub struct Pets;

pub type PetScreen = Screen<Pets>;

impl Resource for Pets {
    type Record = Pet;
    type Payload = Pet;
    type Form = PetForm;
    type Client = PetClient;

    const NOUN: &'static str = "pet";

    fn client(config: &ClientConfig, token: Option<&str>) -> PetClient {
        PetClient::from_config(config, token)
    }

    fn record_id(record: &Pet) -> Option<i64> {
        record.id
    }

    /// New pets belong to the signed-in user unless the form says otherwise.
    fn blank_form(user_id: Option<i64>) -> PetForm {
        PetForm {
            tutor_id: user_id,
            ..PetForm::default()
        }
    }

    fn edit_form(pet: &Pet) -> PetForm {
        PetForm {
            name: pet.name.clone(),
            species: pet.species,
            breed: Some(pet.breed),
            birth_date: pet.birth_date.clone().unwrap_or_default(),
            color: pet.color.clone().unwrap_or_default(),
            weight: Some(pet.weight),
            tutor_id: Some(pet.tutor_id),
        }
    }

    fn check(form: &PetForm, today: NaiveDate) -> Result<Pet, FieldErrors> {
        check_pet(form, today)
    }
}
