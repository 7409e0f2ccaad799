//! Pagination primitives for directory listings.

use serde::Serialize;

use super::errors::DirectoryError;

/// A validated, 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_index: u32,
    page_size: u32,
}

impl PageRequest {
    /// Both values must be at least 1.
    pub fn new(page_index: u32, page_size: u32) -> Result<Self, DirectoryError> {
        if page_index == 0 {
            return Err(DirectoryError::InvalidPage(
                "page index must be at least 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(DirectoryError::InvalidPage(
                "page size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// Cap the page size at `max_page_size`.
    pub fn clamped(self, max_page_size: u32) -> Self {
        Self {
            page_size: self.page_size.min(max_page_size.max(1)),
            ..self
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_index - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// A bounded slice of an ordered result set plus its total count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page_index: request.page_index(),
            page_size: request.page_size(),
        }
    }

    /// Number of pages needed to show `total_count` items.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}
