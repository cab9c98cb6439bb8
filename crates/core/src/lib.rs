//! `petclinic-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod person;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OwnerId, PetId, PetTypeId, VisitId};
pub use person::Person;
