//! HTTP-agnostic error types for services and adapters.

pub mod domain;

pub use domain::DomainError;
