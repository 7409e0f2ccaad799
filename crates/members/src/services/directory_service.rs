//! Read-only directory lookups.

use roster_database::{Member, MemberFilter, MemberRepository};
use tracing::debug;

use super::repository::MemberRepo;
use crate::types::{DirectoryError, DirectoryResult, Page, PageRequest};

pub struct DirectoryQueryService<R = MemberRepository> {
    repository: R,
    max_page_size: u32,
}

impl<R> DirectoryQueryService<R>
where
    R: MemberRepo,
{
    pub fn new(repository: R, max_page_size: u32) -> Self {
        Self {
            repository,
            max_page_size: max_page_size.max(1),
        }
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Exact identifier match. A missing member is `Ok(None)`, never an error.
    pub async fn find_by_identifier(&self, identifier: i64) -> DirectoryResult<Option<Member>> {
        let member = self.repository.find_by_identifier(identifier).await?;
        debug!(identifier, found = member.is_some(), "identifier lookup");
        Ok(member)
    }

    /// Members whose display name equals `name` exactly.
    pub async fn find_by_name(
        &self,
        name: &str,
        page_index: u32,
        page_size: u32,
    ) -> DirectoryResult<Page<Member>> {
        if name.trim().is_empty() {
            return Err(DirectoryError::InvalidQuery(
                "name must not be blank".to_string(),
            ));
        }

        self.page(MemberFilter::DisplayName(name.to_string()), page_index, page_size)
            .await
    }

    /// All members in insertion order.
    pub async fn list_all(&self, page_index: u32, page_size: u32) -> DirectoryResult<Page<Member>> {
        self.page(MemberFilter::All, page_index, page_size).await
    }

    /// The whole roster in one response.
    pub async fn list_everything(&self) -> DirectoryResult<Vec<Member>> {
        let (members, _) = self.repository.find(&MemberFilter::All, 0, None).await?;
        Ok(members)
    }

    async fn page(
        &self,
        filter: MemberFilter,
        page_index: u32,
        page_size: u32,
    ) -> DirectoryResult<Page<Member>> {
        let request = PageRequest::new(page_index, page_size)?.clamped(self.max_page_size);

        let (items, total_count) = self
            .repository
            .find(&filter, request.offset(), Some(request.limit()))
            .await?;

        Ok(Page::new(items, total_count, request))
    }
}
