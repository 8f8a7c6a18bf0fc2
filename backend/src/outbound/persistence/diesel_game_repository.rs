//! PostgreSQL-backed `GameRepository` implementation using Diesel ORM.
//!
//! A game must sit on a platform of the same owner. Inserts select the
//! platform row under the owner predicate, and updates check the target
//! platform in the same statement, so a foreign or missing platform reads as
//! `NotFound` and nothing is written.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Bool, Nullable, Text, Timestamptz, Uuid as SqlUuid};

use super::diesel_helpers::classify_scan_error;
use super::filtered_query::{BindValue, FilteredQuery, contains_pattern};
use super::models::GameRow;
use super::ownership::owned_directly;
use super::pool::DbPool;
use crate::domain::ports::{GameRepository, RepositoryError};
use crate::domain::{Game, GameDraft, GameFilter, GameId, Page, PlaythroughStatus, UserId};
use crate::{create_with_id, query_row, query_rows, run_single_row_affected};

const ENTITY: &str = "game";

const LIST_BASE_SQL: &str = concat!(
    "select games.id, games.platform_id, games.title, games.owned, games.release_date, \
     games.released from games where ",
    owned_directly!("games", 1)
);

const LIST_ORDER: &str = "games.title, games.id";

const GET_SQL: &str = concat!(
    "select games.id, games.platform_id, games.title, games.owned, games.release_date, \
     games.released from games where games.id = $1 and ",
    owned_directly!("games", 2)
);

const INSERT_SQL: &str = concat!(
    "insert into games (platform_id, title, owned, release_date, released, user_id) \
     select platforms.id, $2, $3, $4, $5, platforms.user_id from platforms \
     where platforms.id = $1 and ",
    owned_directly!("platforms", 6),
    " returning id"
);

const UPDATE_SQL: &str = concat!(
    "update games set platform_id = $1, title = $2, owned = $3, release_date = $4, \
     released = $5 where games.id = $6 and ",
    owned_directly!("games", 7),
    " and exists (select 1 from platforms where platforms.id = $1 and ",
    owned_directly!("platforms", 7),
    ")"
);

const DELETE_SQL: &str = concat!(
    "delete from games where games.id = $1 and ",
    owned_directly!("games", 2)
);

/// Diesel-backed implementation of the game repository port.
#[derive(Clone)]
pub struct DieselGameRepository {
    pool: DbPool,
}

impl DieselGameRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn scan(row: GameRow) -> Result<Game, RepositoryError> {
    Game::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
}

/// Compose the list statement; unset filters add nothing.
fn list_query(owner: UserId, filter: &GameFilter) -> FilteredQuery {
    let query = FilteredQuery::new(LIST_BASE_SQL, owner)
        .and_where_some(
            filter.title(),
            |p| format!("games.title ilike {p}"),
            |title| BindValue::Text(contains_pattern(title)),
        )
        .and_where_some(filter.owned(), |p| format!("games.owned = {p}"), BindValue::Bool)
        .and_where_some(
            filter.released(),
            |p| format!("games.released = {p}"),
            BindValue::Bool,
        );
    match filter.in_progress() {
        Some(wanted) => query.and_where(
            |p| in_progress_predicate(wanted, p),
            BindValue::SmallInt(PlaythroughStatus::InProgress.as_i16()),
        ),
        None => query,
    }
}

fn in_progress_predicate(wanted: bool, placeholder: &str) -> String {
    let negation = if wanted { "" } else { "not " };
    format!(
        "{negation}exists (select 1 from playthroughs progress \
         where progress.game_id = games.id and progress.status = {placeholder})"
    )
}

#[async_trait]
impl GameRepository for DieselGameRepository {
    async fn list(
        &self,
        owner: UserId,
        filter: &GameFilter,
        page: Page,
    ) -> Result<Vec<Game>, RepositoryError> {
        let query = list_query(owner, filter).finish(LIST_ORDER, page);
        query_rows!(self, ENTITY, query, GameRow, scan)
    }

    async fn get(&self, id: GameId, owner: UserId) -> Result<Game, RepositoryError> {
        let query = sql_query(GET_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        query_row!(self, ENTITY, query, GameRow, scan)
    }

    async fn create(&self, draft: GameDraft, owner: UserId) -> Result<Game, RepositoryError> {
        let query = sql_query(INSERT_SQL)
            .bind::<SqlUuid, _>(*draft.platform_id().as_uuid())
            .bind::<Text, _>(draft.title().to_owned())
            .bind::<Bool, _>(draft.owned())
            .bind::<Nullable<Timestamptz>, _>(draft.release_date())
            .bind::<Bool, _>(draft.released())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        create_with_id!(self, ENTITY, query, draft)
    }

    async fn update(&self, game: &Game, owner: UserId) -> Result<(), RepositoryError> {
        let details = game.details();
        let query = sql_query(UPDATE_SQL)
            .bind::<SqlUuid, _>(*details.platform_id().as_uuid())
            .bind::<Text, _>(details.title().to_owned())
            .bind::<Bool, _>(details.owned())
            .bind::<Nullable<Timestamptz>, _>(details.release_date())
            .bind::<Bool, _>(details.released())
            .bind::<SqlUuid, _>(*game.id().as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }

    async fn delete(&self, id: GameId, owner: UserId) -> Result<(), RepositoryError> {
        let query = sql_query(DELETE_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }
}
