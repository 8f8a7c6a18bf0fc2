//! Domain types for the game library.
//!
//! Purpose: define the entities a user tracks (platforms, games,
//! playthroughs, notes), their validation rules, the error model shared by
//! every adapter, and the ports adapters implement.
//!
//! Public surface:
//! - Entities and drafts: [`Platform`], [`Game`], [`Playthrough`],
//!   [`GameNote`] and their `*Draft` counterparts.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`LoginProviders`]: the enabled identity providers.

pub mod error;
pub mod game;
mod ids;
pub mod login;
pub mod note;
pub mod page;
pub mod platform;
pub mod playthrough;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::game::{Game, GameDraft, GameFilter};
pub use self::ids::{AssignId, GameId, NoteId, PlatformId, PlaythroughId, UserId};
pub use self::login::LoginProviders;
pub use self::note::{GameNote, NoteDraft, NoteKind, NoteSummary};
pub use self::page::Page;
pub use self::platform::{Platform, PlatformDraft};
pub use self::playthrough::{Playthrough, PlaythroughDraft, PlaythroughStatus};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ProviderIdentity, User};
pub use self::validation::{FieldError, FieldErrorKind};
