//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod agreement_repo;
pub mod corporate_signature_repo;
pub mod individual_signature_repo;
pub mod linked_repository_repo;
pub mod user_repo;

pub use agreement_repo::AgreementRepo;
pub use corporate_signature_repo::CorporateSignatureRepo;
pub use individual_signature_repo::IndividualSignatureRepo;
pub use linked_repository_repo::LinkedRepositoryRepo;
pub use user_repo::UserRepo;
