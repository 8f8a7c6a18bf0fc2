//! Free-form notes and links attached to a game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldError, FieldErrorKind, bounded_text, limited_text};
use super::{GameId, NoteId};

/// Maximum note title length in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 100;
/// Maximum note body length in characters.
pub const MAX_NOTE_VALUE_LENGTH: usize = 10_000;

/// How the note body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum NoteKind {
    /// Plain text.
    Text = 0,
    /// A URL.
    Link = 1,
}

impl NoteKind {
    /// Column value for this kind.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for NoteKind {
    type Error = FieldError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Text),
            1 => Ok(Self::Link),
            _ => Err(FieldError::new(
                "kind",
                FieldErrorKind::OutOfRange { min: 0, max: 1 },
            )),
        }
    }
}

/// Validated note fields, without an identifier or timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    game_id: GameId,
    title: String,
    value: String,
    kind: NoteKind,
    pinned: bool,
}

impl NoteDraft {
    /// Validate note fields.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the title is blank or either text field is
    /// too long.
    pub fn new(
        game_id: GameId,
        title: &str,
        value: impl Into<String>,
        kind: NoteKind,
        pinned: bool,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            game_id,
            title: bounded_text("title", title, MAX_NOTE_TITLE_LENGTH)?,
            value: limited_text("value", value.into(), MAX_NOTE_VALUE_LENGTH)?,
            kind,
            pinned,
        })
    }

    /// Game the note belongs to.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text or URL.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Body interpretation.
    #[must_use]
    pub const fn kind(&self) -> NoteKind {
        self.kind
    }

    /// Whether the note is pinned to the top of the game's notes.
    #[must_use]
    pub const fn pinned(&self) -> bool {
        self.pinned
    }

    /// Attach the stored id and the database-assigned timestamp.
    #[must_use]
    pub fn into_note(self, id: NoteId, added_on: DateTime<Utc>) -> GameNote {
        GameNote {
            id,
            game_id: self.game_id,
            title: self.title,
            value: self.value,
            kind: self.kind,
            added_on,
            pinned: self.pinned,
        }
    }
}

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameNote {
    id: NoteId,
    game_id: GameId,
    title: String,
    value: String,
    kind: NoteKind,
    added_on: DateTime<Utc>,
    pinned: bool,
}

impl GameNote {
    /// Stored identifier.
    #[must_use]
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// Game the note belongs to.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text or URL.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Body interpretation.
    #[must_use]
    pub const fn kind(&self) -> NoteKind {
        self.kind
    }

    /// When the note was stored.
    #[must_use]
    pub const fn added_on(&self) -> DateTime<Utc> {
        self.added_on
    }

    /// Whether the note is pinned.
    #[must_use]
    pub const fn pinned(&self) -> bool {
        self.pinned
    }
}

/// A note without its body, as returned by title listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    /// Stored identifier.
    pub id: NoteId,
    /// Game the note belongs to.
    pub game_id: GameId,
    /// Title.
    pub title: String,
    /// Body interpretation.
    pub kind: NoteKind,
    /// When the note was stored.
    pub added_on: DateTime<Utc>,
    /// Whether the note is pinned.
    pub pinned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NoteKind::Text, 0)]
    #[case(NoteKind::Link, 1)]
    fn kind_maps_to_column_value(#[case] kind: NoteKind, #[case] value: i16) {
        assert_eq!(kind.as_i16(), value);
        assert_eq!(NoteKind::try_from(value), Ok(kind));
    }

    #[rstest]
    fn unknown_kind_is_rejected() {
        assert!(NoteKind::try_from(2).is_err());
    }

    #[rstest]
    fn overlong_value_is_rejected() {
        let value = "a".repeat(MAX_NOTE_VALUE_LENGTH + 1);
        let err = NoteDraft::new(GameId::random(), "Guide", value, NoteKind::Text, false)
            .expect_err("value too long");
        assert_eq!(err.field(), "value");
    }

    #[rstest]
    fn value_is_kept_verbatim() {
        let draft = NoteDraft::new(GameId::random(), "Map", "  spaced  ", NoteKind::Text, true)
            .expect("valid note");
        assert_eq!(draft.value(), "  spaced  ");
        assert!(draft.pinned());
    }
}
