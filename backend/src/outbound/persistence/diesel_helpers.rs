//! Shared helpers and macros for Diesel repository implementations.
//!
//! This module is the only place raw database failures are classified:
//! - [`classify_diesel_error`] and [`classify_pool_error`] map driver and pool
//!   errors into [`RepositoryError`].
//! - [`expect_single_row`] enforces the single-row-affected contract.
//! - The `query_row!`, `query_rows!`, `create_with_id!` and
//!   `run_single_row_affected!` macros wrap the connection checkout, the
//!   statement and the classification for each execution shape.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::FieldError;
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Prefix PostgreSQL uses when a parent row is still referenced.
const REFERENCED_PARENT_PREFIX: &str = "update or delete on table";

/// Map Diesel errors for statements touching `entity`.
pub fn classify_diesel_error(error: DieselError, entity: &'static str) -> RepositoryError {
    match error {
        DieselError::NotFound => RepositoryError::not_found(entity),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                entity,
                constraint = info.constraint_name(),
                "unique constraint rejected write"
            );
            let constraint = info.constraint_name().unwrap_or("unique constraint");
            RepositoryError::conflict(format!("{entity} violates {constraint}"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(entity, message = info.message(), "foreign key rejected write");
            if info.message().starts_with(REFERENCED_PARENT_PREFIX) {
                RepositoryError::conflict(format!("{entity} is still referenced"))
            } else {
                RepositoryError::not_found(entity)
            }
        }
        other => {
            warn!(entity, error = %other, "unclassified database failure");
            RepositoryError::unexpected(other.to_string())
        }
    }
}

/// Map pool checkout failures; they are never retried here.
pub fn classify_pool_error(error: PoolError) -> RepositoryError {
    warn!(error = %error, "database connection unavailable");
    RepositoryError::unexpected(error.to_string())
}

/// Map a stored row that no longer passes domain validation.
pub fn classify_scan_error(error: FieldError, entity: &'static str) -> RepositoryError {
    warn!(entity, error = %error, "stored row failed validation");
    RepositoryError::unexpected(format!("stored {entity} is invalid: {error}"))
}

/// Enforce that an update or delete touched exactly one row.
///
/// # Errors
/// `NotFound` for zero rows; `TooManyRowsAffected` for more than one.
pub fn expect_single_row(affected: usize, entity: &'static str) -> Result<(), RepositoryError> {
    match affected {
        0 => Err(RepositoryError::not_found(entity)),
        1 => Ok(()),
        _ => {
            error!(entity, affected, "single-row statement affected several rows");
            Err(RepositoryError::too_many_rows_affected(affected))
        }
    }
}

/// Row holding the identifier returned by an insert.
#[derive(Debug, Clone, Copy, diesel::QueryableByName)]
pub(crate) struct IdRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
}

/// Run a statement expected to yield exactly one row and scan it.
///
/// Zero rows become `NotFound`; a failing scan is returned unchanged.
#[macro_export]
macro_rules! query_row {
    ($self:ident, $entity:expr, $query:expr, $row_type:ty, $scan:expr) => {{
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{
            classify_diesel_error, classify_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(classify_pool_error)?;
        let row: $row_type = $query
            .get_result(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, $entity))?;
        ($scan)(row)
    }};
}

/// Stream rows in statement order and scan each of them.
///
/// The row stream and the connection are released when the macro's block
/// ends, whether the scan succeeded or not.
#[macro_export]
macro_rules! query_rows {
    ($self:ident, $entity:expr, $query:expr, $row_type:ty, $scan:expr) => {{
        use diesel_async::RunQueryDsl;
        use futures_util::TryStreamExt;
        use futures_util::future::ready;
        use $crate::outbound::persistence::diesel_helpers::{
            classify_diesel_error, classify_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(classify_pool_error)?;
        $query
            .load_stream::<$row_type>(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, $entity))?
            .map_err(|err| classify_diesel_error(err, $entity))
            .and_then(|row| ready(($scan)(row)))
            .try_collect::<Vec<_>>()
            .await
    }};
}

/// Run an insert returning one generated id and assign it to `draft`.
///
/// An insert whose `select` matched nothing returns no row; that is the
/// failed parent precondition and becomes `NotFound`.
#[macro_export]
macro_rules! create_with_id {
    ($self:ident, $entity:expr, $query:expr, $draft:expr) => {{
        use diesel::OptionalExtension;
        use diesel_async::RunQueryDsl;
        use $crate::domain::AssignId;
        use $crate::domain::ports::RepositoryError;
        use $crate::outbound::persistence::diesel_helpers::{
            IdRow, classify_diesel_error, classify_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(classify_pool_error)?;
        let row: Option<IdRow> = $query
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| classify_diesel_error(err, $entity))?;
        match row {
            Some(IdRow { id }) => Ok($draft.assign_id(id.into())),
            None => Err(RepositoryError::not_found($entity)),
        }
    }};
}

/// Execute an update or delete that must touch exactly one row.
#[macro_export]
macro_rules! run_single_row_affected {
    ($self:ident, $entity:expr, $query:expr) => {{
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{
            classify_diesel_error, classify_pool_error, expect_single_row,
        };

        let mut conn = $self.pool.get().await.map_err(classify_pool_error)?;
        let affected = $query
            .execute(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, $entity))?;
        expect_single_row(affected, $entity)
    }};
}
