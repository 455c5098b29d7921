//! Command-line front end for the product listing.

pub mod args;
pub mod browse;
pub mod render;
