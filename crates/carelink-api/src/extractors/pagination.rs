//! Pagination query parameters.

use serde::Deserialize;

use carelink_core::types::pagination::PageRequest;

/// Query-string pagination parameters, e.g. `?page=2&per_page=50`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts to a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let params = PaginationParams {
            page: None,
            per_page: None,
        };
        let page = params.into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 25);
    }

    #[test]
    fn test_values_clamped() {
        let params = PaginationParams {
            page: Some(0),
            per_page: Some(10_000),
        };
        let page = params.into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }
}
