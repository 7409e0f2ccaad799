//! Updates and removals of existing members.

use std::sync::Arc;

use roster_database::{Member, MemberChanges, MemberRepository};
use tracing::info;

use super::repository::MemberRepo;
use crate::types::{MembershipError, MembershipResult, UpdateMemberRequest};
use crate::utils::PasswordHasher;

pub struct MembershipService<R = MemberRepository> {
    repository: R,
    hasher: Arc<PasswordHasher>,
}

impl<R> MembershipService<R>
where
    R: MemberRepo,
{
    pub fn new(repository: R, hasher: Arc<PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Rewrite the supplied non-identifier fields and return the stored result.
    /// A new password is re-hashed before it reaches the store.
    pub async fn update_member(
        &self,
        identifier: i64,
        request: UpdateMemberRequest,
    ) -> MembershipResult<Member> {
        if request.is_empty() {
            return Err(MembershipError::NoChanges);
        }
        request.validate().map_err(MembershipError::InvalidField)?;

        let password_hash = match &request.password {
            Some(password) => Some(self.hasher.hash_blocking(password).await?),
            None => None,
        };

        let changes = MemberChanges {
            display_name: request.display_name,
            email: request.email,
            sex: request.sex,
            grade: request.grade,
            password_hash,
        };

        let affected = self.repository.update(identifier, &changes).await?;
        if affected == 0 {
            return Err(MembershipError::MemberNotFound(identifier));
        }

        let member = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(MembershipError::MemberNotFound(identifier))?;

        info!(identifier, "updated member");
        Ok(member)
    }

    pub async fn delete_member(&self, identifier: i64) -> MembershipResult<()> {
        let affected = self.repository.delete(identifier).await?;
        if affected == 0 {
            return Err(MembershipError::MemberNotFound(identifier));
        }

        info!(identifier, "deleted member");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory_repository::InMemoryMemberRepository;
    use roster_config::HashingConfig;
    use roster_database::NewMember;

    async fn create_service() -> MembershipService<InMemoryMemberRepository> {
        let hasher = Arc::new(
            PasswordHasher::new(&HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        let repository = InMemoryMemberRepository::new();
        repository
            .insert(&NewMember {
                identifier: 1001,
                display_name: "Alice".to_string(),
                email: "alice@school.example".to_string(),
                sex: "female".to_string(),
                grade: "2024".to_string(),
                password_hash: hasher.hash("pw").unwrap(),
            })
            .await
            .unwrap();

        MembershipService::new(repository, hasher)
    }

    #[tokio::test]
    async fn test_update_member_fields() {
        let service = create_service().await;

        let updated = service
            .update_member(
                1001,
                UpdateMemberRequest {
                    display_name: Some("Alice Liddell".to_string()),
                    grade: Some("2025".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.identifier, 1001);
        assert_eq!(updated.display_name, "Alice Liddell");
        assert_eq!(updated.grade, "2025");
        assert_eq!(updated.email, "alice@school.example");
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let service = create_service().await;

        let updated = service
            .update_member(
                1001,
                UpdateMemberRequest {
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.password_hash, "new-secret");
        assert!(service.hasher.verify("new-secret", &updated.password_hash));
        assert!(!service.hasher.verify("pw", &updated.password_hash));
    }

    #[tokio::test]
    async fn test_update_rejections() {
        let service = create_service().await;

        assert_eq!(
            service
                .update_member(1001, UpdateMemberRequest::default())
                .await
                .unwrap_err(),
            MembershipError::NoChanges
        );

        let bad_email = UpdateMemberRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_member(1001, bad_email).await,
            Err(MembershipError::InvalidField(_))
        ));

        let rename = UpdateMemberRequest {
            display_name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert_eq!(
            service.update_member(4242, rename).await.unwrap_err(),
            MembershipError::MemberNotFound(4242)
        );
    }

    #[tokio::test]
    async fn test_delete_member() {
        let service = create_service().await;

        service.delete_member(1001).await.unwrap();
        assert_eq!(
            service.delete_member(1001).await.unwrap_err(),
            MembershipError::MemberNotFound(1001)
        );
        assert!(service.repository.is_empty().await);
    }
}
