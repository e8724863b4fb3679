//! REST API endpoint tests

mod auth_tests;
mod health_tests;
mod person_tests;
mod pet_tests;
