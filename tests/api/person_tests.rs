//! Person API Tests

use axum::{body::Bytes, http::StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use pet_registry::application::dto::PersonResponse;
use pet_registry::application::services::person_service::{DUPLICATE_FULL_NAME, NAME_REQUIRED};

use crate::common::{person_body, TestApp};

#[tokio::test]
async fn test_create_then_fetch() {
    let app = TestApp::new().await;

    let response = app.server.post("/v1/person").json(&person_body("Harm", "van der Wal")).await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.text().is_empty());
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("/v1/person/"));

    let person: PersonResponse = app.server.get(location).await.json();
    assert_eq!(person.first_name, "Harm");
    assert_eq!(person.last_name, "van der Wal");
    assert_eq!(person.postal_code, "1234 AB");
    assert_eq!(person.house_number_additions.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_duplicate_person_is_rejected() {
    let app = TestApp::new().await;
    app.create_person("Harm", "van der Wal").await;

    let response = app.server.post("/v1/person").json(&person_body("Harm", "van der Wal")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["messages"][0], DUPLICATE_FULL_NAME);
    assert_eq!(app.store.person_count(), 1);
}

#[tokio::test]
async fn test_invalid_postal_code_is_rejected() {
    let app = TestApp::new().await;
    let mut body = person_body("Harm", "van der Wal");
    body["postalCode"] = "12AB".into();

    let response = app.server.post("/v1/person").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["messages"][0],
        "postalCode value '12AB' must be four digits followed by two letters"
    );
    assert_eq!(app.store.person_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/v1/person")
        .bytes(Bytes::from_static(b"{\"firstName\": "))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_people_in_registration_order() {
    let app = TestApp::new().await;
    app.create_person("Harm", "van der Wal").await;
    app.create_person("Anna", "de Vries").await;

    let people: Vec<PersonResponse> = app.server.get("/v1/person").await.json();

    let names: Vec<_> = people.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, vec!["Harm", "Anna"]);
    assert!(people.iter().all(|p| p.id.is_some()));
}

#[tokio::test]
async fn test_search_by_full_name() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;
    app.create_person("Harm", "Jansen").await;

    let person: PersonResponse = app
        .server
        .get("/v1/person/search")
        .add_query_param("firstName", "Harm")
        .add_query_param("lastName", "van der Wal")
        .await
        .json();

    assert_eq!(person.id, Some(id));
}

#[tokio::test]
async fn test_search_by_last_name_only() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;

    let person: PersonResponse = app
        .server
        .get("/v1/person/search")
        .add_query_param("lastName", "van der Wal")
        .await
        .json();

    assert_eq!(person.id, Some(id));
}

#[tokio::test]
async fn test_search_without_names_is_rejected() {
    let app = TestApp::new().await;

    let response = app.server.get("/v1/person/search").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["messages"][0], NAME_REQUIRED);
}

#[tokio::test]
async fn test_search_miss_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/v1/person/search")
        .add_query_param("firstName", "Harm")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["messages"][0], "No person found with name: Harm null");
}

#[tokio::test]
async fn test_unknown_person_is_not_found() {
    let app = TestApp::new().await;
    let id = uuid::Uuid::new_v4();

    let response = app.server.get(&format!("/v1/person/{}", id)).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["messages"][0], format!("No person found with ID {}", id));
}

#[tokio::test]
async fn test_malformed_person_id_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.server.get("/v1/person/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
