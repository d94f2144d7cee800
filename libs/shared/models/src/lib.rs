pub mod auth;
pub mod error;
pub mod records;
pub mod status;
