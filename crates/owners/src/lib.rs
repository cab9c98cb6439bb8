//! Owners domain module (clinic customers, their pets and visits).
//!
//! This crate contains the owner aggregate and its declarative configuration
//! (validation schema, persistence mapping), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod mapping;
pub mod owner;
pub mod pet;
pub mod validation;
pub mod visit;

pub use mapping::{CascadePolicy, FetchPolicy, OwnerColumns, OwnerMapping, PetsRelation};
pub use owner::Owner;
pub use pet::{Pet, PetType};
pub use validation::{
    FieldConstraint, FieldError, FieldRule, OwnerField, OwnerSchema, OwnerValidator, ValidationErrors,
};
pub use visit::Visit;
