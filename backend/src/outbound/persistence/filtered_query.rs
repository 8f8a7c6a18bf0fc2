//! Incremental builder for list statements with optional predicates.
//!
//! Predicates are appended together with their bind values; placeholders are
//! numbered from the position of the value in the bind list, so the SQL text
//! and the parameters can never drift apart.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_query;
use diesel::sql_types::{BigInt, Bool, SmallInt, Text};
use uuid::Uuid;

use crate::domain::{Page, UserId};

/// A typed bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindValue {
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    SmallInt(i16),
    BigInt(i64),
}

/// SQL text plus its ordered bind values.
#[derive(Debug, Clone)]
pub(crate) struct FilteredQuery {
    sql: String,
    binds: Vec<BindValue>,
}

impl FilteredQuery {
    /// Start from a statement whose `where` clause binds the owner as `$1`.
    pub(crate) fn new(base: &str, owner: UserId) -> Self {
        Self {
            sql: base.to_owned(),
            binds: vec![BindValue::Uuid(*owner.as_uuid())],
        }
    }

    /// Append ` and <predicate>`; `predicate` receives the placeholder for
    /// `value`.
    #[must_use]
    pub(crate) fn and_where(
        mut self,
        predicate: impl FnOnce(&str) -> String,
        value: BindValue,
    ) -> Self {
        let placeholder = self.push(value);
        self.sql.push_str(" and ");
        self.sql.push_str(&predicate(&placeholder));
        self
    }

    /// Like [`Self::and_where`] but only when `value` is set.
    #[must_use]
    pub(crate) fn and_where_some<T>(
        self,
        value: Option<T>,
        predicate: impl FnOnce(&str) -> String,
        bind: impl FnOnce(T) -> BindValue,
    ) -> Self {
        match value {
            Some(value) => self.and_where(predicate, bind(value)),
            None => self,
        }
    }

    /// Append ordering and pagination, then bind everything.
    pub(crate) fn finish(mut self, order_by: &str, page: Page) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        let limit = self.push(BindValue::BigInt(page.limit()));
        let offset = self.push(BindValue::BigInt(page.offset()));
        self.sql
            .push_str(&format!(" order by {order_by} limit {limit} offset {offset}"));

        self.binds
            .into_iter()
            .fold(sql_query(self.sql).into_boxed::<Pg>(), |query, bind| match bind {
                BindValue::Uuid(value) => query.bind::<diesel::sql_types::Uuid, _>(value),
                BindValue::Text(value) => query.bind::<Text, _>(value),
                BindValue::Bool(value) => query.bind::<Bool, _>(value),
                BindValue::SmallInt(value) => query.bind::<SmallInt, _>(value),
                BindValue::BigInt(value) => query.bind::<BigInt, _>(value),
            })
    }

    fn push(&mut self, value: BindValue) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    #[cfg(test)]
    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }

    #[cfg(test)]
    pub(crate) fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}

/// Wrap `needle` for a case-insensitive substring `ilike`, escaping the
/// pattern metacharacters.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "select * from games where games.user_id = $1";

    #[rstest]
    fn owner_is_the_first_bind() {
        let owner = UserId::random();
        let query = FilteredQuery::new(BASE, owner);
        assert_eq!(query.sql(), BASE);
        assert_eq!(query.binds(), [BindValue::Uuid(*owner.as_uuid())]);
    }

    #[rstest]
    fn placeholders_follow_bind_positions() {
        let query = FilteredQuery::new(BASE, UserId::random())
            .and_where(|p| format!("games.owned = {p}"), BindValue::Bool(true))
            .and_where(|p| format!("games.released = {p}"), BindValue::Bool(false));
        assert_eq!(
            query.sql(),
            format!("{BASE} and games.owned = $2 and games.released = $3")
        );
        assert_eq!(query.binds().len(), 3);
    }

    #[rstest]
    fn unset_filters_leave_no_trace() {
        let query = FilteredQuery::new(BASE, UserId::random())
            .and_where_some(None::<bool>, |p| format!("games.owned = {p}"), BindValue::Bool)
            .and_where_some(Some(false), |p| format!("games.released = {p}"), BindValue::Bool);
        assert_eq!(query.sql(), format!("{BASE} and games.released = $2"));
        assert_eq!(query.binds()[1], BindValue::Bool(false));
    }

    #[rstest]
    #[case("bc", "%bc%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\x", "%c:\\\\x%")]
    fn patterns_escape_metacharacters(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }
}
