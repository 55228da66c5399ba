//! Catalog Core Library
//!
//! Error taxonomy, the storage port, and submission validation for the
//! product catalog.

// Re-export pure types from catalog-types
pub use catalog_types::*;

pub mod draft;
pub mod error;
pub mod ports;

pub use draft::ProductDraft;
pub use error::{CatalogError, Result, ValidationError};
pub use ports::ProductStore;
