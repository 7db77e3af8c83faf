//! # Quill Core
//!
//! The domain layer of the Quill content API.
//! This crate contains the post lifecycle rules with zero infrastructure dependencies:
//! the entity and its normalization, the error taxonomy, the ports the
//! infrastructure implements, and the lifecycle manager orchestrating them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
