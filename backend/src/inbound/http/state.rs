//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::LoginProviders;
use crate::domain::ports::{
    GameRepository, NoteRepository, PlatformRepository, PlaythroughRepository, UserRepository,
};

/// Parameter object bundling all repository implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub platforms: Arc<dyn PlatformRepository>,
    pub games: Arc<dyn GameRepository>,
    pub playthroughs: Arc<dyn PlaythroughRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub users: Arc<dyn UserRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub platforms: Arc<dyn PlatformRepository>,
    pub games: Arc<dyn GameRepository>,
    pub playthroughs: Arc<dyn PlaythroughRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub users: Arc<dyn UserRepository>,
    pub login: LoginProviders,
}

impl HttpState {
    /// Construct state from the repository bundle and the enabled login
    /// providers.
    pub fn new(ports: HttpStatePorts, login: LoginProviders) -> Self {
        let HttpStatePorts {
            platforms,
            games,
            playthroughs,
            notes,
            users,
        } = ports;
        Self {
            platforms,
            games,
            playthroughs,
            notes,
            users,
            login,
        }
    }
}
