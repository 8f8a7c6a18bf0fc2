//! PostgreSQL-backed `PlatformRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text, Uuid as SqlUuid};

use super::diesel_helpers::classify_scan_error;
use super::models::PlatformRow;
use super::ownership::owned_directly;
use super::pool::DbPool;
use crate::domain::ports::{PlatformRepository, RepositoryError};
use crate::domain::{Page, Platform, PlatformDraft, PlatformId, UserId};
use crate::{create_with_id, query_row, query_rows, run_single_row_affected};

const ENTITY: &str = "platform";

const LIST_SQL: &str = concat!(
    "select platforms.id, platforms.name, platforms.short_name from platforms where ",
    owned_directly!("platforms", 1),
    " order by platforms.name, platforms.id limit $2 offset $3"
);

const GET_SQL: &str = concat!(
    "select platforms.id, platforms.name, platforms.short_name from platforms \
     where platforms.id = $1 and ",
    owned_directly!("platforms", 2)
);

const INSERT_SQL: &str =
    "insert into platforms (name, short_name, user_id) values ($1, $2, $3) returning id";

const UPDATE_SQL: &str = concat!(
    "update platforms set name = $1, short_name = $2 where platforms.id = $3 and ",
    owned_directly!("platforms", 4)
);

const DELETE_SQL: &str = concat!(
    "delete from platforms where platforms.id = $1 and ",
    owned_directly!("platforms", 2)
);

/// Diesel-backed implementation of the platform repository port.
#[derive(Clone)]
pub struct DieselPlatformRepository {
    pool: DbPool,
}

impl DieselPlatformRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn scan(row: PlatformRow) -> Result<Platform, RepositoryError> {
    Platform::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
}

#[async_trait]
impl PlatformRepository for DieselPlatformRepository {
    async fn list(&self, owner: UserId, page: Page) -> Result<Vec<Platform>, RepositoryError> {
        let query = sql_query(LIST_SQL)
            .bind::<SqlUuid, _>(*owner.as_uuid())
            .bind::<BigInt, _>(page.limit())
            .bind::<BigInt, _>(page.offset());
        query_rows!(self, ENTITY, query, PlatformRow, scan)
    }

    async fn get(&self, id: PlatformId, owner: UserId) -> Result<Platform, RepositoryError> {
        let query = sql_query(GET_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        query_row!(self, ENTITY, query, PlatformRow, scan)
    }

    async fn create(
        &self,
        draft: PlatformDraft,
        owner: UserId,
    ) -> Result<Platform, RepositoryError> {
        let query = sql_query(INSERT_SQL)
            .bind::<Text, _>(draft.name().to_owned())
            .bind::<Text, _>(draft.short_name().to_owned())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        create_with_id!(self, ENTITY, query, draft)
    }

    async fn update(&self, platform: &Platform, owner: UserId) -> Result<(), RepositoryError> {
        let query = sql_query(UPDATE_SQL)
            .bind::<Text, _>(platform.name().to_owned())
            .bind::<Text, _>(platform.short_name().to_owned())
            .bind::<SqlUuid, _>(*platform.id().as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }

    async fn delete(&self, id: PlatformId, owner: UserId) -> Result<(), RepositoryError> {
        let query = sql_query(DELETE_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn reads_and_writes_filter_on_the_owner() {
        for sql in [LIST_SQL, GET_SQL, UPDATE_SQL, DELETE_SQL] {
            assert!(sql.contains("platforms.user_id = $"), "{sql}");
        }
    }

    #[rstest]
    fn listing_is_ordered_by_name() {
        assert!(LIST_SQL.contains("order by platforms.name, platforms.id"));
    }
}
