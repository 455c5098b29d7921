//! GraphQL access to the commerce backend.
//!
//! - `config`: endpoint, sales channel, timeout
//! - `queries`: query documents and request bodies
//! - `wire`: response shapes and their conversion into catalog types
//! - `client`: `GraphQlProductFetcher`

pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod wire;

pub use client::GraphQlProductFetcher;
pub use config::GraphQlConfig;
pub use error::GraphQlError;
