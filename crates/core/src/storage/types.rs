use super::PaginationError;

/// Default number of articles per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
}

impl Pagination {
    /// Creates a page request, validating that `page >= 1` and `size >= 1`.
    pub fn new(page: u32, size: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage);
        }
        if size == 0 {
            return Err(PaginationError::InvalidSize);
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip: `(page - 1) * size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Number of rows to fetch.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    /// `ceil(total_count / size)`.
    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(u64::from(self.size))
    }

    /// True iff at least one row exists beyond this page.
    pub fn has_more(&self, total_count: u64) -> bool {
        u64::from(self.page) * u64::from(self.size) < total_count
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
