//! Shared utilities: password hashing, currency support, random test data

pub mod currency;
pub mod password;
pub mod random;
