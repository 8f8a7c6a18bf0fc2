//! Offset pagination for list operations.

use super::validation::{FieldError, in_range};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Validate a requested window, applying defaults for missing values.
    ///
    /// # Errors
    /// Returns [`FieldError`] when `limit` is outside `1..=100` or `offset`
    /// is negative.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, FieldError> {
        let limit = in_range("limit", limit.unwrap_or(DEFAULT_PAGE_LIMIT), 1, MAX_PAGE_LIMIT)?;
        let offset = in_range("offset", offset.unwrap_or(0), 0, i64::MAX)?;
        Ok(Self { limit, offset })
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_values_use_defaults() {
        assert_eq!(Page::new(None, None), Ok(Page::default()));
    }

    #[rstest]
    #[case(Some(0), None, "limit")]
    #[case(Some(101), None, "limit")]
    #[case(None, Some(-1), "offset")]
    fn out_of_range_values_are_rejected(
        #[case] limit: Option<i64>,
        #[case] offset: Option<i64>,
        #[case] field: &str,
    ) {
        let err = Page::new(limit, offset).expect_err("invalid page");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn accepts_bounds() {
        let page = Page::new(Some(100), Some(40)).expect("valid page");
        assert_eq!((page.limit(), page.offset()), (100, 40));
    }
}
