//! Shared domain types for the CLA signing service.
//!
//! Kept deliberately small: primitive type aliases, the domain error enum,
//! and pure helpers used by both the database and API layers.

pub mod emails;
pub mod error;
pub mod status;
pub mod types;
