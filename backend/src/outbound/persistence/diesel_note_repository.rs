//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! Notes live in `game_notes`; the caller must own the game a note hangs off.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Bool, SmallInt, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use super::diesel_helpers::{classify_diesel_error, classify_pool_error, classify_scan_error};
use super::models::{InsertedNoteRow, NoteRow, NoteSummaryRow};
use super::ownership::{owned_directly, owned_via_game};
use super::pool::DbPool;
use crate::domain::ports::{NoteRepository, RepositoryError};
use crate::domain::{GameId, GameNote, NoteDraft, NoteId, NoteSummary, Page, UserId};
use crate::{query_row, query_rows, run_single_row_affected};

const ENTITY: &str = "note";

const LIST_TITLES_SQL: &str = concat!(
    "select game_notes.id, game_notes.game_id, game_notes.title, game_notes.kind, \
     game_notes.added_on, game_notes.pinned from game_notes \
     where game_notes.game_id = $1 and ",
    owned_via_game!("game_notes", 2),
    " order by game_notes.pinned desc, game_notes.added_on desc, game_notes.id \
     limit $3 offset $4"
);

const GET_SQL: &str = concat!(
    "select game_notes.id, game_notes.game_id, game_notes.title, game_notes.value, \
     game_notes.kind, game_notes.added_on, game_notes.pinned from game_notes \
     where game_notes.id = $1 and ",
    owned_via_game!("game_notes", 2)
);

const INSERT_SQL: &str = concat!(
    "insert into game_notes (game_id, title, value, kind, pinned) \
     select games.id, $2, $3, $4, $5 from games where games.id = $1 and ",
    owned_directly!("games", 6),
    " returning id, added_on"
);

const UPDATE_SQL: &str = concat!(
    "update game_notes set game_id = $1, title = $2, value = $3, kind = $4, pinned = $5 \
     where game_notes.id = $6 and ",
    owned_via_game!("game_notes", 7),
    " and exists (select 1 from games where games.id = $1 and ",
    owned_directly!("games", 7),
    ")"
);

const DELETE_SQL: &str = concat!(
    "delete from game_notes where game_notes.id = $1 and ",
    owned_via_game!("game_notes", 2)
);

/// Diesel-backed implementation of the note repository port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_titles(
        &self,
        game_id: GameId,
        owner: UserId,
        page: Page,
    ) -> Result<Vec<NoteSummary>, RepositoryError> {
        let query = sql_query(LIST_TITLES_SQL)
            .bind::<SqlUuid, _>(*game_id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid())
            .bind::<BigInt, _>(page.limit())
            .bind::<BigInt, _>(page.offset());
        query_rows!(self, ENTITY, query, NoteSummaryRow, |row: NoteSummaryRow| {
            NoteSummary::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
        })
    }

    async fn get(&self, id: NoteId, owner: UserId) -> Result<GameNote, RepositoryError> {
        let query = sql_query(GET_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        query_row!(self, ENTITY, query, NoteRow, |row: NoteRow| {
            GameNote::try_from(row).map_err(|err| classify_scan_error(err, ENTITY))
        })
    }

    // The insert also returns the database timestamp, so this cannot go
    // through `create_with_id!`.
    async fn create(&self, draft: NoteDraft, owner: UserId) -> Result<GameNote, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(classify_pool_error)?;
        let inserted: Option<InsertedNoteRow> = sql_query(INSERT_SQL)
            .bind::<SqlUuid, _>(*draft.game_id().as_uuid())
            .bind::<Text, _>(draft.title().to_owned())
            .bind::<Text, _>(draft.value().to_owned())
            .bind::<SmallInt, _>(draft.kind().as_i16())
            .bind::<Bool, _>(draft.pinned())
            .bind::<SqlUuid, _>(*owner.as_uuid())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| classify_diesel_error(err, ENTITY))?;
        let InsertedNoteRow { id, added_on } =
            inserted.ok_or_else(|| RepositoryError::not_found(ENTITY))?;
        Ok(draft.into_note(NoteId::from_uuid(id), added_on))
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        owner: UserId,
    ) -> Result<(), RepositoryError> {
        let query = sql_query(UPDATE_SQL)
            .bind::<SqlUuid, _>(*draft.game_id().as_uuid())
            .bind::<Text, _>(draft.title().to_owned())
            .bind::<Text, _>(draft.value().to_owned())
            .bind::<SmallInt, _>(draft.kind().as_i16())
            .bind::<Bool, _>(draft.pinned())
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }

    async fn delete(&self, id: NoteId, owner: UserId) -> Result<(), RepositoryError> {
        let query = sql_query(DELETE_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*owner.as_uuid());
        run_single_row_affected!(self, ENTITY, query)
    }
}
