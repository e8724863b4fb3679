//! Address update authorization tests

use axum::http::{header::WWW_AUTHENTICATE, StatusCode};
use pretty_assertions::assert_eq;

use pet_registry::application::dto::PersonResponse;

use crate::common::{
    address_body, basic_auth, TestApp, ADMIN_PASSWORD, ADMIN_USERNAME, USER_PASSWORD,
    USER_USERNAME,
};

#[tokio::test]
async fn test_update_without_credentials_is_unauthorized() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;

    let response = app
        .server
        .put(&format!("/v1/person/{}", id))
        .json(&address_body("4321 ZX"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.header(WWW_AUTHENTICATE).to_str().unwrap(),
        "Basic realm=\"pet-registry\""
    );
}

#[tokio::test]
async fn test_update_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;
    let (name, value) = basic_auth(ADMIN_USERNAME, "not-the-password");

    let response = app
        .server
        .put(&format!("/v1/person/{}", id))
        .add_header(name, value)
        .json(&address_body("4321 ZX"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_without_admin_role_is_forbidden() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;
    let (name, value) = basic_auth(USER_USERNAME, USER_PASSWORD);

    let response = app
        .server
        .put(&format!("/v1/person/{}", id))
        .add_header(name, value)
        .json(&address_body("4321 ZX"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_updates_address_idempotently() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;
    let path = format!("/v1/person/{}", id);
    let before: PersonResponse = app.server.get(&path).await.json();

    let mut states = Vec::new();
    for _ in 0..2 {
        let (name, value) = basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD);
        app.server
            .put(&path)
            .add_header(name, value)
            .json(&address_body("4321 zx"))
            .await
            .assert_status_ok();
        states.push(app.server.get(&path).await.json::<PersonResponse>());
    }

    assert_eq!(states[0], states[1]);
    let after = &states[1];
    assert_eq!(after.street, "Kerkstraat");
    assert_eq!(after.postal_code, "4321 zx");
    assert_eq!(after.house_number_additions, None);
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.date_of_birth, before.date_of_birth);
}

#[tokio::test]
async fn test_admin_update_of_unknown_person_is_not_found() {
    let app = TestApp::new().await;
    let (name, value) = basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD);

    let response = app
        .server
        .put(&format!("/v1/person/{}", uuid::Uuid::new_v4()))
        .add_header(name, value)
        .json(&address_body("4321 ZX"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_update_with_invalid_postal_code_is_rejected() {
    let app = TestApp::new().await;
    let id = app.create_person("Harm", "van der Wal").await;
    let (name, value) = basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD);

    let response = app
        .server
        .put(&format!("/v1/person/{}", id))
        .add_header(name, value)
        .json(&address_body("ABCD 12"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
