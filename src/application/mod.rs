//! Application Layer
//!
//! Contains business logic services, data transfer objects (DTOs) and the
//! mapping between them and the domain entities. This layer orchestrates the
//! flow of data between the presentation and domain layers.

pub mod dto;
pub mod mapper;
pub mod services;
