//! Common Test Utilities
//!
//! An in-memory application served through `axum-test`, with an
//! administrator and a regular user already registered.

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use axum_extra::headers::{Authorization, HeaderMapExt};
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use pet_registry::application::services::auth_service::hash_password;
use pet_registry::config::{AdminSettings, CorsSettings};
use pet_registry::domain::{Role, User, UserRepository};
use pet_registry::infrastructure::repositories::{InMemoryStore, InMemoryUserRepository};
use pet_registry::startup::{bootstrap_admin, build_router, AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const USER_USERNAME: &str = "clerk";
pub const USER_PASSWORD: &str = "clerk-password";

/// Test application builder
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = InMemoryStore::new();
        let state = AppState::in_memory(store.clone());

        let admin = AdminSettings {
            username: ADMIN_USERNAME.into(),
            password: ADMIN_PASSWORD.into(),
        };
        bootstrap_admin(&state, Some(&admin))
            .await
            .expect("admin bootstrap");

        InMemoryUserRepository::new(store.clone())
            .create(&User {
                id: Uuid::new_v4(),
                username: USER_USERNAME.into(),
                password_hash: hash_password(USER_PASSWORD).expect("hash"),
                roles: vec![Role::User],
                enabled: true,
                locked: false,
            })
            .await
            .expect("seed user");

        let router = build_router(state, &CorsSettings { allowed_origins: vec![] });
        let server = TestServer::new(router).expect("test server");

        Self { server, store }
    }

    /// Register a person and return the id from the `Location` header
    pub async fn create_person(&self, first_name: &str, last_name: &str) -> Uuid {
        let response = self
            .server
            .post("/v1/person")
            .json(&person_body(first_name, last_name))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_from_location(&response.header("location"))
    }

    /// Register a pet and return its id
    pub async fn create_pet(&self, name: &str, age: i32, person_id: Option<Uuid>) -> Uuid {
        let response = self
            .server
            .post("/v1/pet")
            .json(&json!({ "name": name, "age": age, "personId": person_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_from_location(&response.header("location"))
    }
}

pub fn person_body(first_name: &str, last_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "dateOfBirth": "1985-04-12",
        "street": "Dorpsstraat",
        "houseNumber": 12,
        "houseNumberAdditions": "A",
        "postalCode": "1234 AB",
        "city": "Utrecht",
        "country": "Netherlands"
    })
}

pub fn address_body(postal_code: &str) -> Value {
    json!({
        "street": "Kerkstraat",
        "houseNumber": 7,
        "houseNumberAdditions": null,
        "postalCode": postal_code,
        "city": "Amsterdam",
        "country": "Netherlands"
    })
}

pub fn id_from_location(location: &HeaderValue) -> Uuid {
    let location = location.to_str().expect("ascii location");
    let raw = location.rsplit('/').next().expect("id segment");
    Uuid::parse_str(raw).expect("uuid in location")
}

/// `Authorization: Basic ...` header for the given credentials
pub fn basic_auth(username: &str, password: &str) -> (HeaderName, HeaderValue) {
    let mut headers = HeaderMap::new();
    headers.typed_insert(Authorization::basic(username, password));
    let value = headers.get(AUTHORIZATION).cloned().expect("encoded header");
    (AUTHORIZATION, value)
}

