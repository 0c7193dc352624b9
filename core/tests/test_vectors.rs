//! Verify the pets client's field mapping against JSON vectors in `test-vectors/`.
//!
//! Request bodies are compared as parsed JSON so field order never matters.

use petclub_core::{ApiError, HttpMethod, HttpResponse, Pet, PetClient};

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::Network(_) => "Network",
        ApiError::NotFound => "NotFound",
        ApiError::DuplicateName(_) => "DuplicateName",
        ApiError::Http { .. } => "Http",
        ApiError::UnknownSpecies(_) => "UnknownSpecies",
        ApiError::InvalidDate(_) => "InvalidDate",
        ApiError::Deserialization(_) => "Deserialization",
        ApiError::Serialization(_) => "Serialization",
        ApiError::InvalidUrl(_) => "InvalidUrl",
    }
}

fn vectors() -> serde_json::Value {
    serde_json::from_str(include_str!("../../test-vectors/pet_mapping.json")).unwrap()
}

#[test]
fn request_vectors() {
    let vectors = vectors();
    let client = PetClient::new(vectors["base_url"].as_str().unwrap());

    for case in vectors["requests"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Pet = serde_json::from_value(case["input"].clone()).unwrap();
        let expected = &case["expected_request"];

        let req = client.build_create(&input).unwrap();
        assert_eq!(
            req.method,
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(req.path, expected["path"].as_str().unwrap(), "{name}: path");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

#[test]
fn response_vectors() {
    let vectors = vectors();
    let client = PetClient::new(vectors["base_url"].as_str().unwrap());

    for case in vectors["responses"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse::new(
            case["response"]["status"].as_u64().unwrap() as u16,
            case["response"]["body"].as_str().unwrap(),
        );
        let result = client.parse_list(response);

        match case.get("expected_error") {
            Some(kind) => {
                let err = result.expect_err(name);
                assert_eq!(error_kind(&err), kind.as_str().unwrap(), "{name}: error kind");
            }
            None => {
                let expected: Vec<Pet> = serde_json::from_value(case["expected"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}");
            }
        }
    }
}
