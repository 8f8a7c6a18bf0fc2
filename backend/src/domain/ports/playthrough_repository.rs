//! Port for storing playthroughs; ownership follows the parent game.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GameId, Page, Playthrough, PlaythroughDraft, PlaythroughId, UserId};

/// CRUD over playthroughs of games owned by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaythroughRepository: Send + Sync {
    /// List playthroughs, newest start first, optionally for a single game.
    async fn list(
        &self,
        owner: UserId,
        game_id: Option<GameId>,
        page: Page,
    ) -> Result<Vec<Playthrough>, RepositoryError>;

    /// Fetch one playthrough.
    async fn get(&self, id: PlaythroughId, owner: UserId) -> Result<Playthrough, RepositoryError>;

    /// Store a new playthrough of a game owned by `owner`.
    async fn create(
        &self,
        draft: PlaythroughDraft,
        owner: UserId,
    ) -> Result<Playthrough, RepositoryError>;

    /// Replace the fields of an existing playthrough.
    async fn update(&self, playthrough: &Playthrough, owner: UserId)
    -> Result<(), RepositoryError>;

    /// Remove a playthrough.
    async fn delete(&self, id: PlaythroughId, owner: UserId) -> Result<(), RepositoryError>;
}
