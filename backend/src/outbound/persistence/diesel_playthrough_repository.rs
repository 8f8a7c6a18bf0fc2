//! PostgreSQL-backed `PlaythroughRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Integer, Nullable, SmallInt, Timestamptz, Uuid as SqlUuid};

use super::diesel_helpers::classify_scan_error;
use super::filtered_query::{BindValue, FilteredQuery};
use super::models::PlaythroughRow;
use super::ownership::{owned_directly, owned_via_game};
use super::pool::DbPool;
use crate::domain::ports::{PlaythroughRepository, RepositoryError};
use crate::domain::{GameId, Page, Playthrough, PlaythroughDraft, PlaythroughId, UserId};
use crate::{create_with_id, query_row, query_rows, run_single_row_affected};

const ENTITY: &str = "playthrough";

const LIST_BASE_SQL: &str = concat!(
    "select playthroughs.id, playthroughs.game_id, playthroughs.start_date, \
     playthroughs.end_date, playthroughs.status, playthroughs.runtime_minutes \
     from playthroughs where ",
    owned_via_game!("playthroughs", 1)
);

const LIST_ORDER: &str = "playthroughs.start_date desc, playthroughs.id";

const GET_SQL: &str = concat!(
    "select playthroughs.id, playthroughs.game_id, playthroughs.start_date, \
     playthroughs.end_date, playthroughs.status, playthroughs.runtime_minutes \
     from playthroughs where playthroughs.id = $1 and ",
    owned_via_game!("playthroughs", 2)
);

const INSERT_SQL: &str = concat!(
    "insert into playthroughs (game_id, start_date, end_date, status, runtime_minutes) \
     select games.id, $2, $3, $4, $5 from games where games.id = $1 and ",
    owned_directly!("games", 6),
    " returning id"
);

const UPDATE_SQL: &str = concat!(
    "update playthroughs set game_id = $1, start_date = $2, end_date = $3, status = $4, \
     runtime_minutes = $5 where playthroughs.id = $6 and ",
    owned_via_game!("playthroughs", 7),
    " and exists (select 1 from games where games.id = $1 and ",
    owned_directly!("games", 7),
    ")"
);

const DELETE_SQL: &str = concat!(
    "delete from playthroughs where playthroughs.id = $1 and ",
    owned_via_game!("playthroughs", 2)
);

/// Diesel-backed implementation of the playthrough repository port.
#[derive(Clone)]
pub struct DieselPlaythroughRepository {
    pool: DbPool,
}

impl DieselPlaythroughRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn scan(row: PlaythroughRow) -> Result<Playthrough, RepositoryError> {
    Playthrough::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
}

fn list_query(owner: UserId, game_id: Option<GameId>) -> FilteredQuery {
    FilteredQuery::new(LIST_BASE_SQL, owner).and_where_some(
        game_id,
        |p| format!("playthroughs.game_id = {p}"),
        |id| BindValue::Uuid(*id.as_uuid()),
    )
}

#[async_trait]
impl PlaythroughRepository for DieselPlaythroughRepository {
    async fn list(
        &self,
        owner: UserId,
        game_id: Option<GameId>,
        page: Page,
    ) -> Result<Vec<Playthrough>, RepositoryError> {
        let query = list_query(owner, game_id).finish(LIST_ORDER, page);
        query_rows!(self, ENTITY, query, PlaythroughRow, scan)
    }

    async fn get(&self, id: PlaythroughId, owner: UserId) -> Result<Playthrough, RepositoryError> {
        let query = sql_query(GET_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        query_row!(self, ENTITY, query, PlaythroughRow, scan)
    }

    async fn create(
        &self,
        draft: PlaythroughDraft,
        owner: UserId,
    ) -> Result<Playthrough, RepositoryError> {
        let query = sql_query(INSERT_SQL)
            .bind::<SqlUuid, _>(*draft.game_id().as_uuid())
            .bind::<Timestamptz, _>(draft.start_date())
            .bind::<Nullable<Timestamptz>, _>(draft.end_date())
            .bind::<SmallInt, _>(draft.status().as_i16())
            .bind::<Nullable<Integer>, _>(draft.runtime_minutes())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        create_with_id!(self, ENTITY, query, draft)
    }

    async fn update(
        &self,
        playthrough: &Playthrough,
        owner: UserId,
    ) -> Result<(), RepositoryError> {
        let details = playthrough.details();
        let query = sql_query(UPDATE_SQL)
            .bind::<SqlUuid, _>(*details.game_id().as_uuid())
            .bind::<Timestamptz, _>(details.start_date())
            .bind::<Nullable<Timestamptz>, _>(details.end_date())
            .bind::<SmallInt, _>(details.status().as_i16())
            .bind::<Nullable<Integer>, _>(details.runtime_minutes())
            .bind::<SqlUuid, _>(*playthrough.id().as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }

    async fn delete(&self, id: PlaythroughId, owner: UserId) -> Result<(), RepositoryError> {
        let query = sql_query(DELETE_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }
}
