//! Offset pagination shared by list, search and comment page reads.

use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("limit: must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: u32, max: u32 },
}

/// Zero-based page index plus a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::InvalidLimit {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Resolve optional query values against the given default limit.
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, PaginationError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(default_limit))
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }

    /// Slice an ordered collection the way a store would page it.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}
