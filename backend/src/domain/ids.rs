//! UUID-backed identifier newtypes for every persisted entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a library owner.
    UserId
}

define_entity_id! {
    /// Identifier of a gaming platform.
    PlatformId
}

define_entity_id! {
    /// Identifier of a game in a user's library.
    GameId
}

define_entity_id! {
    /// Identifier of a single playthrough of a game.
    PlaythroughId
}

define_entity_id! {
    /// Identifier of a note attached to a game.
    NoteId
}

impl UserId {
    /// The identity used for requests without a logged-in user.
    ///
    /// It is the nil UUID, which is never assigned to a stored user, so every
    /// ownership predicate evaluated against it matches nothing.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the [`UserId::anonymous`] identity.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0.is_nil()
    }
}

/// Drafts that become stored entities once the database assigns an id.
///
/// Repositories insert the draft, read back the generated id and call
/// [`AssignId::assign_id`] so callers receive the complete entity.
pub trait AssignId {
    /// Identifier type generated on insert.
    type Id: From<Uuid>;
    /// Entity produced by attaching the identifier.
    type Entity;

    /// Consume the draft and attach the generated identifier.
    fn assign_id(self, id: Self::Id) -> Self::Entity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn anonymous_user_is_nil() {
        let anonymous = UserId::anonymous();
        assert!(anonymous.is_anonymous());
        assert_eq!(anonymous.as_uuid(), &Uuid::nil());
        assert!(!UserId::random().is_anonymous());
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("not-a-uuid", false)]
    fn ids_parse_from_strings(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(raw.parse::<GameId>().is_ok(), valid);
    }

    #[rstest]
    fn ids_serialise_as_bare_uuids() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&PlatformId::from_uuid(uuid)).expect("serialise id");
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
