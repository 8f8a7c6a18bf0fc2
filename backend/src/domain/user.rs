//! Library owners and the external identities they log in with.
//!
//! A user is keyed by the pair of provider name and the subject id that
//! provider reports, so logging in again through the same provider resolves
//! to the same user while the email is refreshed.

use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;
use super::validation::{FieldError, bounded_text, limited_text};

const MAX_EMAIL_LENGTH: usize = 320;
const MAX_PROVIDER_FIELD_LENGTH: usize = 255;

/// Identity reported by a login provider after a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    provider_id: String,
    provider_name: String,
    email: String,
}

impl ProviderIdentity {
    /// Validate and build an identity.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the subject id or provider name is blank or
    /// any field exceeds its column limit.
    pub fn new(
        provider_id: &str,
        provider_name: &str,
        email: impl Into<String>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            provider_id: bounded_text("providerId", provider_id, MAX_PROVIDER_FIELD_LENGTH)?,
            provider_name: bounded_text("providerName", provider_name, MAX_PROVIDER_FIELD_LENGTH)?,
            email: limited_text("email", email.into(), MAX_EMAIL_LENGTH)?,
        })
    }

    /// Subject identifier assigned by the provider.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Name of the provider, e.g. `github`.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Email reported by the provider; may be empty.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A stored library owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    provider_id: String,
    provider_name: String,
    email: String,
}

impl User {
    /// Attach a stored id to a provider identity.
    #[must_use]
    pub fn new(id: UserId, identity: ProviderIdentity) -> Self {
        let ProviderIdentity {
            provider_id,
            provider_name,
            email,
        } = identity;
        Self {
            id,
            provider_id,
            provider_name,
            email,
        }
    }

    /// Stored identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Subject identifier assigned by the provider.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Provider the user logged in with.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Last email reported by the provider.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
