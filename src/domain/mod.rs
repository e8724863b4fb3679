//! # Domain Layer
//!
//! The domain layer contains the entities of the registry and the
//! repository traits through which they are stored. It is independent of
//! any external frameworks or infrastructure concerns.

pub mod entities;

pub use entities::*;
