//! `autoparts-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory
//! model and the application session (no IO, no logging setup).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{MovementId, PartId};
pub use value_object::{Money, ValueObject};
