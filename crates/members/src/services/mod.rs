//! Member services.

pub mod authentication_service;
pub mod directory_service;
pub mod memory_repository;
pub mod membership_service;
pub mod registration_service;
pub mod repository;

pub use authentication_service::AuthenticationService;
pub use directory_service::DirectoryQueryService;
pub use memory_repository::InMemoryMemberRepository;
pub use membership_service::MembershipService;
pub use registration_service::RegistrationService;
pub use repository::MemberRepo;
