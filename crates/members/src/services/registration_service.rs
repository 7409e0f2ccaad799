//! Member registration.

use std::sync::Arc;

use roster_database::{Member, MemberRepository, NewMember};
use tracing::{debug, info};

use super::repository::MemberRepo;
use crate::types::{RegisterRequest, RegistrationError, RegistrationResult};
use crate::utils::PasswordHasher;

/// Validates candidates and commits new members.
pub struct RegistrationService<R = MemberRepository> {
    repository: R,
    hasher: Arc<PasswordHasher>,
}

impl<R> RegistrationService<R>
where
    R: MemberRepo,
{
    pub fn new(repository: R, hasher: Arc<PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new member.
    ///
    /// Nothing is written unless field validation, the confirmation check and the
    /// identifier pre-check all pass. The store's unique index has the final word on
    /// duplicates, so two racing registrations still yield exactly one member.
    pub async fn register(&self, request: RegisterRequest) -> RegistrationResult<Member> {
        request.validate().map_err(RegistrationError::InvalidField)?;

        if request.password != request.password_confirmation {
            return Err(RegistrationError::PasswordMismatch);
        }

        if self
            .repository
            .find_by_identifier(request.identifier)
            .await?
            .is_some()
        {
            debug!(identifier = request.identifier, "registration rejected by pre-check");
            return Err(RegistrationError::DuplicateIdentifier(request.identifier));
        }

        let password_hash = self.hasher.hash_blocking(&request.password).await?;

        let member = self
            .repository
            .insert(&NewMember {
                identifier: request.identifier,
                display_name: request.display_name,
                email: request.email,
                sex: request.sex,
                grade: request.grade,
                password_hash,
            })
            .await?;

        info!(identifier = member.identifier, "registered new member");
        Ok(member)
    }
}
