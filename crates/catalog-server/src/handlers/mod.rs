//! HTTP handlers

pub mod form;
pub mod health;
pub mod products;

pub use health::health;
