//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Person response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub street: String,
    pub house_number: i32,
    pub house_number_additions: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

/// Pet response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub age: i32,
    pub person_id: Option<Uuid>,
}
