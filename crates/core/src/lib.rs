//! `storefront-core`: shared building blocks for the storefront client.
//!
//! This crate contains **pure** primitives (no IO, no async runtime).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, RequestId, VariantId};
pub use value_object::ValueObject;
