//! Port for storing a user's platforms.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Page, Platform, PlatformDraft, PlatformId, UserId};

/// Ownership-filtered CRUD over platforms.
///
/// Every call is scoped to `owner`; rows belonging to other users behave as
/// if they did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformRepository: Send + Sync {
    /// List the owner's platforms ordered by name.
    async fn list(&self, owner: UserId, page: Page) -> Result<Vec<Platform>, RepositoryError>;

    /// Fetch one platform.
    async fn get(&self, id: PlatformId, owner: UserId) -> Result<Platform, RepositoryError>;

    /// Store a new platform; names are unique per owner.
    async fn create(
        &self,
        draft: PlatformDraft,
        owner: UserId,
    ) -> Result<Platform, RepositoryError>;

    /// Replace the fields of an existing platform.
    async fn update(&self, platform: &Platform, owner: UserId) -> Result<(), RepositoryError>;

    /// Remove a platform that no game refers to.
    async fn delete(&self, id: PlatformId, owner: UserId) -> Result<(), RepositoryError>;
}
