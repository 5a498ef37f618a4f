//! Session token handling.
//!
//! There are no passwords: users authenticate with GitHub OAuth, after
//! which the service issues its own HS256 session token.

pub mod jwt;
