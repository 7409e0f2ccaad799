//! Credential and input helpers shared by the services.

pub mod jwt;
pub mod password;
pub mod validation;

pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenSubject};
pub use password::PasswordHasher;
