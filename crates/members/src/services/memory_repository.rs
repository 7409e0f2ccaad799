//! In-memory member store used by unit tests and embedders without a database.

use std::sync::Arc;

use chrono::Utc;
use roster_database::{
    Member, MemberChanges, MemberFilter, NewMember, StoreError, StoreResult,
};
use tokio::sync::RwLock;

use super::repository::MemberRepo;

/// Vector-backed store that keeps members in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<Vec<Member>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

fn matches(filter: &MemberFilter, member: &Member) -> bool {
    match filter {
        MemberFilter::All => true,
        MemberFilter::DisplayName(name) => member.display_name == *name,
    }
}

impl MemberRepo for InMemoryMemberRepository {
    async fn find_by_identifier(&self, identifier: i64) -> StoreResult<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.iter().find(|m| m.identifier == identifier).cloned())
    }

    async fn find(
        &self,
        filter: &MemberFilter,
        offset: u64,
        limit: Option<u64>,
    ) -> StoreResult<(Vec<Member>, u64)> {
        let members = self.members.read().await;
        let matching: Vec<&Member> = members.iter().filter(|m| matches(filter, m)).collect();
        let total = matching.len() as u64;

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = limit.map_or(usize::MAX, |value| {
            usize::try_from(value).unwrap_or(usize::MAX)
        });
        let items = matching.into_iter().skip(skip).take(take).cloned().collect();

        Ok((items, total))
    }

    async fn insert(&self, member: &NewMember) -> StoreResult<Member> {
        // Check and push under one write lock.
        let mut members = self.members.write().await;
        if members.iter().any(|m| m.identifier == member.identifier) {
            return Err(StoreError::Conflict(member.identifier));
        }

        let now = Utc::now().to_rfc3339();
        let created = Member {
            identifier: member.identifier,
            display_name: member.display_name.clone(),
            email: member.email.clone(),
            sex: member.sex.clone(),
            grade: member.grade.clone(),
            password_hash: member.password_hash.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        members.push(created.clone());

        Ok(created)
    }

    async fn update(&self, identifier: i64, changes: &MemberChanges) -> StoreResult<u64> {
        let mut members = self.members.write().await;
        let Some(member) = members.iter_mut().find(|m| m.identifier == identifier) else {
            return Ok(0);
        };
        if changes.is_empty() {
            return Ok(1);
        }

        if let Some(display_name) = &changes.display_name {
            member.display_name = display_name.clone();
        }
        if let Some(email) = &changes.email {
            member.email = email.clone();
        }
        if let Some(sex) = &changes.sex {
            member.sex = sex.clone();
        }
        if let Some(grade) = &changes.grade {
            member.grade = grade.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            member.password_hash = password_hash.clone();
        }
        member.updated_at = Utc::now().to_rfc3339();

        Ok(1)
    }

    async fn delete(&self, identifier: i64) -> StoreResult<u64> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| m.identifier != identifier);
        Ok((before - members.len()) as u64)
    }
}
