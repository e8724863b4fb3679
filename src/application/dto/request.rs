//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::POSTAL_CODE;

/// Register a new person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub street: String,
    pub house_number: i32,
    pub house_number_additions: Option<String>,

    #[validate(regex(path = *POSTAL_CODE, message = "must be four digits followed by two letters"))]
    pub postal_code: String,

    pub city: String,
    pub country: String,
}

/// Replace the address of a registered person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    pub street: String,
    pub house_number: i32,
    pub house_number_additions: Option<String>,

    #[validate(regex(path = *POSTAL_CODE, message = "must be four digits followed by two letters"))]
    pub postal_code: String,

    pub city: String,
    pub country: String,
}

/// Register or update a pet.
///
/// `age` is mandatory: a body without it, or with `null`, is rejected
/// while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    pub name: String,
    pub age: i32,
    pub person_id: Option<Uuid>,
}

/// Person search query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSearchParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Pet listing query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetQueryParams {
    pub person_id: Option<String>,
}
