//! `stockdesk-core` — domain foundation building blocks.
//!
//! Pure primitives shared by the viewer crates (no storage, no UI).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::DomainError;
pub use id::DocumentId;
pub use value_object::ValueObject;
