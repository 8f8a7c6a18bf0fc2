//! Playthroughs record each attempt at a game and how it ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldError, FieldErrorKind};
use super::{AssignId, GameId, PlaythroughId};

/// Where a playthrough currently stands.
///
/// The discriminants are the values persisted in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum PlaythroughStatus {
    /// Currently being played.
    InProgress = 0,
    /// Played to the end.
    Completed = 1,
    /// Abandoned for good.
    Dropped = 2,
    /// Finished for all practical purposes without reaching an ending.
    Retired = 3,
    /// Paused with the intent to resume.
    Suspended = 4,
}

impl PlaythroughStatus {
    /// Column value for this status.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for PlaythroughStatus {
    type Error = FieldError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::InProgress),
            1 => Ok(Self::Completed),
            2 => Ok(Self::Dropped),
            3 => Ok(Self::Retired),
            4 => Ok(Self::Suspended),
            _ => Err(FieldError::new(
                "status",
                FieldErrorKind::OutOfRange { min: 0, max: 4 },
            )),
        }
    }
}

/// Validated playthrough fields, without an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaythroughDraft {
    game_id: GameId,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    status: PlaythroughStatus,
    runtime_minutes: Option<i32>,
}

impl PlaythroughDraft {
    /// Validate playthrough fields.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the runtime is negative or the end date
    /// precedes the start date.
    pub fn new(
        game_id: GameId,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        status: PlaythroughStatus,
        runtime_minutes: Option<i32>,
    ) -> Result<Self, FieldError> {
        if runtime_minutes.is_some_and(|minutes| minutes < 0) {
            return Err(FieldError::new(
                "runtimeMinutes",
                FieldErrorKind::OutOfRange {
                    min: 0,
                    max: i64::from(i32::MAX),
                },
            ));
        }
        if end_date.is_some_and(|end| end < start_date) {
            return Err(FieldError::new("endDate", FieldErrorKind::BeforeStart));
        }
        Ok(Self {
            game_id,
            start_date,
            end_date,
            status,
            runtime_minutes,
        })
    }

    /// Game being played.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        self.game_id
    }

    /// When the playthrough started.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// When it ended, if it has.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PlaythroughStatus {
        self.status
    }

    /// Time played in minutes, when tracked.
    #[must_use]
    pub const fn runtime_minutes(&self) -> Option<i32> {
        self.runtime_minutes
    }
}

impl AssignId for PlaythroughDraft {
    type Id = PlaythroughId;
    type Entity = Playthrough;

    fn assign_id(self, id: PlaythroughId) -> Playthrough {
        Playthrough { id, draft: self }
    }
}

/// A stored playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Playthrough {
    id: PlaythroughId,
    #[serde(flatten)]
    draft: PlaythroughDraft,
}

impl Playthrough {
    /// Stored identifier.
    #[must_use]
    pub const fn id(&self) -> PlaythroughId {
        self.id
    }

    /// Stored fields.
    #[must_use]
    pub const fn details(&self) -> &PlaythroughDraft {
        &self.draft
    }
}
