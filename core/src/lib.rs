//! # GreenCity Core
//!
//! Core business logic for GreenCity email verification.
//! This crate contains the domain entities, the error taxonomy, the
//! repository and mail contracts, and the verification services built on them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
