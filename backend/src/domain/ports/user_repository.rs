//! Port for users created through the login flow.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ProviderIdentity, User, UserId};

/// Storage for library owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the identity or, when the provider pair is known, refresh its
    /// email. Returns the stored user either way.
    async fn upsert(&self, identity: ProviderIdentity) -> Result<User, RepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<User, RepositoryError>;
}
