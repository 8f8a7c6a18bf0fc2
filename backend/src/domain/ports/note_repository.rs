//! Port for storing notes; ownership follows the parent game.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GameId, GameNote, NoteDraft, NoteId, NoteSummary, Page, UserId};

/// CRUD over notes attached to games owned by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List a page of a game's notes without their bodies, pinned notes
    /// first.
    async fn list_titles(
        &self,
        game_id: GameId,
        owner: UserId,
        page: Page,
    ) -> Result<Vec<NoteSummary>, RepositoryError>;

    /// Fetch one note including its body.
    async fn get(&self, id: NoteId, owner: UserId) -> Result<GameNote, RepositoryError>;

    /// Store a new note; the timestamp is assigned on insert.
    async fn create(&self, draft: NoteDraft, owner: UserId) -> Result<GameNote, RepositoryError>;

    /// Replace the fields of an existing note, keeping its timestamp.
    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        owner: UserId,
    ) -> Result<(), RepositoryError>;

    /// Remove a note.
    async fn delete(&self, id: NoteId, owner: UserId) -> Result<(), RepositoryError>;
}
