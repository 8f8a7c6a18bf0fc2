//! Port for storing a user's games.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Game, GameDraft, GameFilter, GameId, Page, UserId};

/// Ownership-filtered CRUD over games.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// List the owner's games matching every set filter, ordered by title.
    async fn list(
        &self,
        owner: UserId,
        filter: &GameFilter,
        page: Page,
    ) -> Result<Vec<Game>, RepositoryError>;

    /// Fetch one game.
    async fn get(&self, id: GameId, owner: UserId) -> Result<Game, RepositoryError>;

    /// Store a new game.
    ///
    /// Fails with [`RepositoryError::NotFound`] unless the draft's platform
    /// belongs to `owner`.
    async fn create(&self, draft: GameDraft, owner: UserId) -> Result<Game, RepositoryError>;

    /// Replace the fields of an existing game; the platform must belong to
    /// `owner` as well.
    async fn update(&self, game: &Game, owner: UserId) -> Result<(), RepositoryError>;

    /// Remove a game together with its playthroughs and notes.
    async fn delete(&self, id: GameId, owner: UserId) -> Result<(), RepositoryError>;
}
