use serde::{Deserialize, Serialize};

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Copy, FromForm)]
pub struct PaginationRequest {
    #[field(default = 1, validate = range(1..))]
    page_num: u64,
    #[field(default = 50, validate = range(1..))]
    page_size: u64,
}

impl PaginationRequest {
    pub fn page_num(&self) -> u64 {
        self.page_num
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of documents to skip.
    pub fn skip(&self) -> u64 {
        (self.page_num - 1) * self.page_size
    }

    /// Bound the page size by the configured maximum.
    pub fn clamped(self, max_page_size: u64) -> Self {
        Self {
            page_size: self.page_size.min(max_page_size),
            ..self
        }
    }

    /// Attach the total result count.
    pub fn into_result(self, total: u64) -> PaginationResult {
        PaginationResult {
            page_num: self.page_num,
            page_size: self.page_size,
            total,
        }
    }
}

/// Echo of the applied pagination plus the total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub page_num: u64,
    pub page_size: u64,
    pub total: u64,
}

/// One page of results.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationResult,
}
