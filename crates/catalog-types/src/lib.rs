//! Catalog Types - Pure type definitions
//!
//! This crate contains only plain data types shared by the storage layer and
//! the HTTP surface. It has no runtime or driver dependencies.

pub mod product;

pub use product::*;
