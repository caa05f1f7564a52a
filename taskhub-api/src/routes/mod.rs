/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD plus the per-user task listing
/// - `categories`: Category CRUD
/// - `tasks`: Task CRUD

pub mod categories;
pub mod health;
pub mod tasks;
pub mod users;

use serde::Deserialize;
use validator::Validate;

/// Largest page a list endpoint will return
pub const MAX_PAGE_SIZE: i64 = 100;

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

/// `?skip=&limit=` query parameters shared by every list endpoint
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct Pagination {
    /// Rows to skip
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be 0 or greater"))]
    pub skip: i64,

    /// Maximum rows to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let page: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(Pagination { skip: -1, limit: 10 }.validate().is_err());
        assert!(Pagination { skip: 0, limit: 0 }.validate().is_err());
        assert!(Pagination { skip: 0, limit: 101 }.validate().is_err());
        assert!(Pagination { skip: 5, limit: 1 }.validate().is_ok());
    }
}
