//! Domain ports implemented by outbound adapters.
//!
//! Repository ports share [`RepositoryError`]; each trait is mocked with
//! `mockall` in unit tests.

mod game_repository;
mod identity_provider;
mod macros;
mod note_repository;
mod platform_repository;
mod playthrough_repository;
mod repository_error;
mod user_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use game_repository::MockGameRepository;
pub use game_repository::GameRepository;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::NoteRepository;
#[cfg(test)]
pub use platform_repository::MockPlatformRepository;
pub use platform_repository::PlatformRepository;
#[cfg(test)]
pub use playthrough_repository::MockPlaythroughRepository;
pub use playthrough_repository::PlaythroughRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
