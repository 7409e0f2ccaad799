//! Shared types for the member directory.

pub mod errors;
pub mod page;
pub mod requests;

pub use errors::*;
pub use page::{Page, PageRequest};
pub use requests::{LoginRequest, RegisterRequest, UpdateMemberRequest};
