//! Gaming platforms a user files their games under.

use serde::Serialize;
use utoipa::ToSchema;

use super::validation::{FieldError, bounded_text};
use super::{AssignId, PlatformId};

/// Maximum platform name length in characters.
pub const MAX_PLATFORM_NAME_LENGTH: usize = 200;
/// Maximum platform short name length in characters.
pub const MAX_PLATFORM_SHORT_NAME_LENGTH: usize = 5;

/// Validated platform fields, without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDraft {
    name: String,
    short_name: String,
}

impl PlatformDraft {
    /// Validate platform fields.
    ///
    /// # Errors
    /// Returns [`FieldError`] when either name is blank or too long.
    pub fn new(name: &str, short_name: &str) -> Result<Self, FieldError> {
        Ok(Self {
            name: bounded_text("name", name, MAX_PLATFORM_NAME_LENGTH)?,
            short_name: bounded_text("shortName", short_name, MAX_PLATFORM_SHORT_NAME_LENGTH)?,
        })
    }

    /// Display name, unique per owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Abbreviation shown in compact listings.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

impl AssignId for PlatformDraft {
    type Id = PlatformId;
    type Entity = Platform;

    fn assign_id(self, id: PlatformId) -> Platform {
        Platform {
            id,
            name: self.name,
            short_name: self.short_name,
        }
    }
}

/// A stored platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    id: PlatformId,
    #[schema(example = "Nintendo Switch")]
    name: String,
    #[schema(example = "NSW")]
    short_name: String,
}

impl Platform {
    /// Stored identifier.
    #[must_use]
    pub const fn id(&self) -> PlatformId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Abbreviation.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}
