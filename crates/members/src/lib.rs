//! # Roster Members Crate
//!
//! Registration, credential authentication and directory lookups for the member roster.
//!
//! ## Architecture
//!
//! - **Services**: registration, authentication, directory queries, updates and deletes,
//!   generic over the [`MemberRepo`] storage seam
//! - **Types**: errors, pagination and request types
//! - **Utils**: password hashing, token signing and field validation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_members::{RegistrationService, PasswordHasher};
//!
//! let service = RegistrationService::new(MemberRepository::new(pool), hasher);
//! let member = service.register(request).await?;
//! ```

pub mod services;
pub mod types;
pub mod utils;

pub use roster_database::{Member, MemberRepository};

pub use services::{
    AuthenticationService, DirectoryQueryService, InMemoryMemberRepository, MemberRepo,
    MembershipService, RegistrationService,
};

pub use types::{
    AuthError, AuthResult, DirectoryError, DirectoryResult, ErrorKind, HashingError,
    LoginRequest, MembershipError, MembershipResult, Page, PageRequest, RegisterRequest,
    RegistrationError, RegistrationResult, TokenError, UpdateMemberRequest,
    INVALID_LOGIN_MESSAGE,
};

pub use utils::{Claims, IssuedToken, PasswordHasher, TokenIssuer, TokenSubject};
