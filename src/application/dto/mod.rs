//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{PersonRequest, PersonSearchParams, PetQueryParams, PetRequest, UpdateAddressRequest};
pub use response::{PersonResponse, PetResponse};
