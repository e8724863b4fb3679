//! Pet API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use pet_registry::application::dto::PetResponse;

use crate::common::TestApp;

#[tokio::test]
async fn test_unowned_pet() {
    let app = TestApp::new().await;

    let id = app.create_pet("Dog", 3, None).await;

    let pet: PetResponse = app.server.get(&format!("/v1/pet/{}", id)).await.json();
    assert_eq!(
        pet,
        PetResponse {
            id: Some(id),
            name: "Dog".into(),
            age: 3,
            person_id: None,
        }
    );
}

#[tokio::test]
async fn test_orphan_pet_is_rejected() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    let response = app
        .server
        .post("/v1/pet")
        .json(&json!({ "name": "Dog", "age": 3, "personId": missing }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["messages"][0],
        format!(
            "No person with ID {} is registered; cannot register a pet to a non-existent person",
            missing
        )
    );
    assert_eq!(app.store.pet_count(), 0);
}

#[tokio::test]
async fn test_owned_pet_is_listed_by_owner() {
    let app = TestApp::new().await;
    let owner = app.create_person("Harm", "van der Wal").await;
    let other = app.create_person("Anna", "de Vries").await;
    let dog = app.create_pet("Dog", 3, Some(owner)).await;
    app.create_pet("Cat", 5, Some(other)).await;
    app.create_pet("Fish", 1, None).await;

    let pets: Vec<PetResponse> = app
        .server
        .get("/v1/pet")
        .add_query_param("personId", owner)
        .await
        .json();

    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].id, Some(dog));
    assert_eq!(pets[0].person_id, Some(owner));

    let all: Vec<PetResponse> = app.server.get("/v1/pet").await.json();
    let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Dog", "Cat", "Fish"]);
}

#[tokio::test]
async fn test_pets_of_unknown_person_is_empty() {
    let app = TestApp::new().await;
    app.create_pet("Dog", 3, None).await;

    let pets: Vec<PetResponse> = app
        .server
        .get("/v1/pet")
        .add_query_param("personId", Uuid::new_v4())
        .await
        .json();

    assert!(pets.is_empty());
}

#[tokio::test]
async fn test_malformed_person_id_query_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/v1/pet")
        .add_query_param("personId", "not-a-uuid")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_or_null_age_is_rejected() {
    let app = TestApp::new().await;

    for body in [json!({ "name": "Dog" }), json!({ "name": "Dog", "age": null })] {
        let response = app.server.post("/v1/pet").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert_eq!(app.store.pet_count(), 0);
}

#[tokio::test]
async fn test_update_pet_keeps_owner() {
    let app = TestApp::new().await;
    let owner = app.create_person("Harm", "van der Wal").await;
    let id = app.create_pet("Dog", 3, Some(owner)).await;
    let path = format!("/v1/pet/{}", id);

    app.server
        .put(&path)
        .json(&json!({ "name": "Rex", "age": 4, "personId": null }))
        .await
        .assert_status_ok();

    let pet: PetResponse = app.server.get(&path).await.json();
    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.age, 4);
    assert_eq!(pet.person_id, Some(owner));
}

#[tokio::test]
async fn test_update_unknown_pet_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .put(&format!("/v1/pet/{}", Uuid::new_v4()))
        .json(&json!({ "name": "Rex", "age": 4 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_pet() {
    let app = TestApp::new().await;
    let id = app.create_pet("Dog", 3, None).await;
    let path = format!("/v1/pet/{}", id);

    app.server.delete(&path).await.assert_status_ok();

    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    let response = app.server.delete(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["messages"][0], format!("No pet found with ID {}", id));
}
