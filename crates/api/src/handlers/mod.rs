pub mod admin_cla;
pub mod agreements;
pub mod auth;
pub mod hooks;
pub mod sign;
pub mod user;
