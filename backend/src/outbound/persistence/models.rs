//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions re-run domain validation so a
//! row that no longer satisfies it is reported rather than silently returned.

use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_types::{Bool, Integer, Nullable, SmallInt, Text, Timestamptz};
use uuid::Uuid;

use crate::domain::{
    AssignId, FieldError, Game, GameDraft, GameId, GameNote, NoteDraft, NoteId, NoteKind,
    NoteSummary, Platform, PlatformDraft, PlatformId, Playthrough, PlaythroughDraft,
    PlaythroughId, PlaythroughStatus, ProviderIdentity, User, UserId,
};

/// Row read from the `users` table.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct UserRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = Text)]
    pub provider_id: String,
    #[diesel(sql_type = Text)]
    pub provider_name: String,
    #[diesel(sql_type = Text)]
    pub email: String,
}

impl TryFrom<UserRow> for User {
    type Error = FieldError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let identity = ProviderIdentity::new(&row.provider_id, &row.provider_name, row.email)?;
        Ok(Self::new(UserId::from_uuid(row.id), identity))
    }
}

/// Row read from the `platforms` table.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PlatformRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub short_name: String,
}

impl TryFrom<PlatformRow> for Platform {
    type Error = FieldError;

    fn try_from(row: PlatformRow) -> Result<Self, Self::Error> {
        Ok(PlatformDraft::new(&row.name, &row.short_name)?.assign_id(PlatformId::from_uuid(row.id)))
    }
}

/// Row read from the `games` table.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct GameRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub platform_id: Uuid,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Bool)]
    pub owned: bool,
    #[diesel(sql_type = Nullable<Timestamptz>)]
    pub release_date: Option<DateTime<Utc>>,
    #[diesel(sql_type = Bool)]
    pub released: bool,
}

impl TryFrom<GameRow> for Game {
    type Error = FieldError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let draft = GameDraft::new(
            PlatformId::from_uuid(row.platform_id),
            &row.title,
            row.owned,
            row.release_date,
            row.released,
        )?;
        Ok(draft.assign_id(GameId::from_uuid(row.id)))
    }
}

/// Row read from the `playthroughs` table.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct PlaythroughRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub game_id: Uuid,
    #[diesel(sql_type = Timestamptz)]
    pub start_date: DateTime<Utc>,
    #[diesel(sql_type = Nullable<Timestamptz>)]
    pub end_date: Option<DateTime<Utc>>,
    #[diesel(sql_type = SmallInt)]
    pub status: i16,
    #[diesel(sql_type = Nullable<Integer>)]
    pub runtime_minutes: Option<i32>,
}

impl TryFrom<PlaythroughRow> for Playthrough {
    type Error = FieldError;

    fn try_from(row: PlaythroughRow) -> Result<Self, Self::Error> {
        let draft = PlaythroughDraft::new(
            GameId::from_uuid(row.game_id),
            row.start_date,
            row.end_date,
            PlaythroughStatus::try_from(row.status)?,
            row.runtime_minutes,
        )?;
        Ok(draft.assign_id(PlaythroughId::from_uuid(row.id)))
    }
}

/// Full row read from the `game_notes` table.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct NoteRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub game_id: Uuid,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub value: String,
    #[diesel(sql_type = SmallInt)]
    pub kind: i16,
    #[diesel(sql_type = Timestamptz)]
    pub added_on: DateTime<Utc>,
    #[diesel(sql_type = Bool)]
    pub pinned: bool,
}

impl TryFrom<NoteRow> for GameNote {
    type Error = FieldError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let draft = NoteDraft::new(
            GameId::from_uuid(row.game_id),
            &row.title,
            row.value,
            NoteKind::try_from(row.kind)?,
            row.pinned,
        )?;
        Ok(draft.into_note(NoteId::from_uuid(row.id), row.added_on))
    }
}

/// Note row without its body, for title listings.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct NoteSummaryRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub game_id: Uuid,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = SmallInt)]
    pub kind: i16,
    #[diesel(sql_type = Timestamptz)]
    pub added_on: DateTime<Utc>,
    #[diesel(sql_type = Bool)]
    pub pinned: bool,
}

impl TryFrom<NoteSummaryRow> for NoteSummary {
    type Error = FieldError;

    fn try_from(row: NoteSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NoteId::from_uuid(row.id),
            game_id: GameId::from_uuid(row.game_id),
            title: row.title,
            kind: NoteKind::try_from(row.kind)?,
            added_on: row.added_on,
            pinned: row.pinned,
        })
    }
}

/// Identifier and timestamp returned by a note insert.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct InsertedNoteRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = Timestamptz)]
    pub added_on: DateTime<Utc>,
}
