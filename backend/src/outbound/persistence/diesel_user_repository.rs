//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users are keyed by the provider identity; logging in again with the same
//! `(provider_id, provider_name)` refreshes the email on the existing row.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Text, Uuid as SqlUuid};

use super::diesel_helpers::classify_scan_error;
use super::models::UserRow;
use super::pool::DbPool;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{ProviderIdentity, User, UserId};
use crate::query_row;

const ENTITY: &str = "user";

const UPSERT_SQL: &str = "insert into users (provider_id, provider_name, email) \
                          values ($1, $2, $3) \
                          on conflict (provider_id, provider_name) \
                          do update set email = excluded.email \
                          returning id, provider_id, provider_name, email";

const FIND_BY_ID_SQL: &str =
    "select id, provider_id, provider_name, email from users where id = $1";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn scan(row: UserRow) -> Result<User, RepositoryError> {
    User::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, identity: ProviderIdentity) -> Result<User, RepositoryError> {
        let query = sql_query(UPSERT_SQL)
            .bind::<Text, _>(identity.provider_id().to_owned())
            .bind::<Text, _>(identity.provider_name().to_owned())
            .bind::<Text, _>(identity.email().to_owned());
        query_row!(self, ENTITY, query, UserRow, scan)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        let query = sql_query(FIND_BY_ID_SQL).bind::<SqlUuid, _>(*id.as_uuid());
        query_row!(self, ENTITY, query, UserRow, scan)
    }
}
