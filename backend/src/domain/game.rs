//! Games in a user's library and the filters used to list them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::validation::{FieldError, bounded_text};
use super::{AssignId, GameId, PlatformId};

/// Maximum game title length in characters.
pub const MAX_GAME_TITLE_LENGTH: usize = 500;

/// Validated game fields, without an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    platform_id: PlatformId,
    title: String,
    owned: bool,
    release_date: Option<DateTime<Utc>>,
    released: bool,
}

impl GameDraft {
    /// Validate game fields.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the title is blank or too long.
    pub fn new(
        platform_id: PlatformId,
        title: &str,
        owned: bool,
        release_date: Option<DateTime<Utc>>,
        released: bool,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            platform_id,
            title: bounded_text("title", title, MAX_GAME_TITLE_LENGTH)?,
            owned,
            release_date,
            released,
        })
    }

    /// Platform the game is filed under.
    #[must_use]
    pub const fn platform_id(&self) -> PlatformId {
        self.platform_id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the user owns a copy.
    #[must_use]
    pub const fn owned(&self) -> bool {
        self.owned
    }

    /// Release date, when known.
    #[must_use]
    pub const fn release_date(&self) -> Option<DateTime<Utc>> {
        self.release_date
    }

    /// Whether the game has been released.
    #[must_use]
    pub const fn released(&self) -> bool {
        self.released
    }
}

impl AssignId for GameDraft {
    type Id = GameId;
    type Entity = Game;

    fn assign_id(self, id: GameId) -> Game {
        Game { id, draft: self }
    }
}

/// A stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: GameId,
    #[serde(flatten)]
    draft: GameDraft,
}

impl Game {
    /// Stored identifier.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Stored fields.
    #[must_use]
    pub const fn details(&self) -> &GameDraft {
        &self.draft
    }
}

/// Optional, conjunctive filters for listing games.
///
/// Unset filters place no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    title: Option<String>,
    owned: Option<bool>,
    released: Option<bool>,
    in_progress: Option<bool>,
}

impl GameFilter {
    /// Build a filter; a blank title counts as unset. A non-blank title is
    /// kept as given, surrounding spaces included.
    #[must_use]
    pub fn new(
        title: Option<&str>,
        owned: Option<bool>,
        released: Option<bool>,
        in_progress: Option<bool>,
    ) -> Self {
        let title = title
            .filter(|value| !value.trim().is_empty())
            .map(str::to_owned);
        Self {
            title,
            owned,
            released,
            in_progress,
        }
    }

    /// Case-insensitive substring the title must contain.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Required ownership flag.
    #[must_use]
    pub const fn owned(&self) -> Option<bool> {
        self.owned
    }

    /// Required release flag.
    #[must_use]
    pub const fn released(&self) -> Option<bool> {
        self.released
    }

    /// Whether the game must (or must not) have a playthrough in progress.
    #[must_use]
    pub const fn in_progress(&self) -> Option<bool> {
        self.in_progress
    }
}
