//! Catalog adapter: REST access and response decoding

pub mod records;
pub mod rest;

pub use rest::RestCatalog;
