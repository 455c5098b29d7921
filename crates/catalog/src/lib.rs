//! Catalog read model.
//!
//! Products are owned by the commerce backend; this crate only describes the
//! shape the client reads (no IO, no mutation helpers).

pub mod money;
pub mod options;
pub mod product;

pub use money::Money;
pub use options::{FilterCatalog, FilterOption};
pub use product::{
    AttributeValue, Category, Product, ProductAttribute, ProductMedia, ProductVariant,
};
