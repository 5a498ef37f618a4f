//! Row structs and create/update DTOs, one module per table.

pub mod agreement;
pub mod linked_repository;
pub mod signature;
pub mod user;
