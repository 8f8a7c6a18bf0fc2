//! Query parameters shared by list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, Page};

/// `limit` and `offset` query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Maximum number of items, 1 to 100 (default 20).
    pub limit: Option<i64>,
    /// Number of items to skip (default 0).
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Validate into a [`Page`].
    pub fn page(&self) -> Result<Page, Error> {
        Ok(Page::new(self.limit, self.offset)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn defaults_apply_when_absent() {
        assert_eq!(PageQuery::default().page(), Ok(Page::default()));
    }

    #[rstest]
    fn out_of_range_limit_is_invalid_request() {
        let query = PageQuery {
            limit: Some(500),
            offset: None,
        };
        let err = query.page().expect_err("limit above maximum");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&serde_json::json!("limit"))
        );
    }
}
