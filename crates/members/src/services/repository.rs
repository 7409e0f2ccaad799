//! Storage seam shared by the member services.

use roster_database::{
    Member, MemberChanges, MemberFilter, MemberRepository, NewMember, StoreResult,
};

/// Trait for member stores to allow generic usage
#[allow(async_fn_in_trait)]
pub trait MemberRepo {
    async fn find_by_identifier(&self, identifier: i64) -> StoreResult<Option<Member>>;
    async fn find(
        &self,
        filter: &MemberFilter,
        offset: u64,
        limit: Option<u64>,
    ) -> StoreResult<(Vec<Member>, u64)>;
    /// Must fail with `StoreError::Conflict` when the identifier is taken, atomically.
    async fn insert(&self, member: &NewMember) -> StoreResult<Member>;
    async fn update(&self, identifier: i64, changes: &MemberChanges) -> StoreResult<u64>;
    async fn delete(&self, identifier: i64) -> StoreResult<u64>;
}

impl MemberRepo for MemberRepository {
    async fn find_by_identifier(&self, identifier: i64) -> StoreResult<Option<Member>> {
        MemberRepository::find_by_identifier(self, identifier).await
    }

    async fn find(
        &self,
        filter: &MemberFilter,
        offset: u64,
        limit: Option<u64>,
    ) -> StoreResult<(Vec<Member>, u64)> {
        MemberRepository::find(self, filter, offset, limit).await
    }

    async fn insert(&self, member: &NewMember) -> StoreResult<Member> {
        MemberRepository::insert(self, member).await
    }

    async fn update(&self, identifier: i64, changes: &MemberChanges) -> StoreResult<u64> {
        MemberRepository::update(self, identifier, changes).await
    }

    async fn delete(&self, identifier: i64) -> StoreResult<u64> {
        MemberRepository::delete(self, identifier).await
    }
}
