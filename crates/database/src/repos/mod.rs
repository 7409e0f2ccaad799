//! Database repository implementations

pub mod member_repository;

pub use member_repository::*;
