//! Shared helpers for the repository integration suites.
//!
//! Each suite compiles as its own crate and pulls this module in with
//! `mod support;` under `#[expect(dead_code)]`, since no suite uses every
//! helper.

pub mod cluster_skip;
pub mod embedded_postgres;

use std::future::Future;

use chrono::{DateTime, TimeZone, Utc};
use ludivault::domain::ports::{
    GameRepository, PlatformRepository, PlaythroughRepository, UserRepository,
};
use ludivault::domain::{
    Game, GameDraft, Page, Platform, PlatformDraft, Playthrough, PlaythroughDraft,
    PlaythroughStatus, ProviderIdentity, UserId,
};
use ludivault::outbound::persistence::{
    DbPool, DieselGameRepository, DieselNoteRepository, DieselPlatformRepository,
    DieselPlaythroughRepository, DieselUserRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;

/// One migrated database plus the runtime that drives the repositories.
///
/// Fields drop in order: connections, then the runtime, then the database.
pub struct Library {
    pool: DbPool,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

impl Library {
    fn connect() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let database = embedded_postgres::provision_database()?;
        let config = PoolConfig::new(database.url().to_string())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            pool,
            runtime,
            _database: database,
        })
    }

    /// Drive `future` to completion on the suite runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn platforms(&self) -> DieselPlatformRepository {
        DieselPlatformRepository::new(self.pool.clone())
    }

    pub fn games(&self) -> DieselGameRepository {
        DieselGameRepository::new(self.pool.clone())
    }

    pub fn playthroughs(&self) -> DieselPlaythroughRepository {
        DieselPlaythroughRepository::new(self.pool.clone())
    }

    pub fn notes(&self) -> DieselNoteRepository {
        DieselNoteRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> DieselUserRepository {
        DieselUserRepository::new(self.pool.clone())
    }

    /// Store a GitHub user with the given subject id.
    pub fn user(&self, subject: &str) -> UserId {
        let identity = ProviderIdentity::new(subject, "github", format!("{subject}@example.test"))
            .expect("valid identity");
        self.run(self.users().upsert(identity))
            .expect("upsert user")
            .id()
    }

    pub fn platform(&self, owner: UserId, name: &str) -> Platform {
        let draft = PlatformDraft::new(name, "PLT").expect("valid platform");
        self.run(self.platforms().create(draft, owner))
            .expect("create platform")
    }

    pub fn game(&self, owner: UserId, platform: &Platform, title: &str) -> Game {
        let draft = GameDraft::new(platform.id(), title, true, None, true).expect("valid game");
        self.run(self.games().create(draft, owner)).expect("create game")
    }

    pub fn playthrough(
        &self,
        owner: UserId,
        game: &Game,
        start: DateTime<Utc>,
        status: PlaythroughStatus,
    ) -> Playthrough {
        let draft = PlaythroughDraft::new(game.id(), start, None, status, None)
            .expect("valid playthrough");
        self.run(self.playthroughs().create(draft, owner))
            .expect("create playthrough")
    }
}

/// Fixture entry point: `None` when the cluster is unavailable and skipping
/// is allowed.
pub fn library() -> Option<Library> {
    Library::connect().map_or_else(|reason| handle_cluster_setup_failure(reason), Some)
}

/// Midday UTC on the given day of March 2024.
pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .single()
        .expect("valid date")
}

/// The default page.
pub fn first_page() -> Page {
    Page::new(None, None).expect("default page")
}

/// A window of `limit` rows starting at `offset`.
pub fn page(limit: i64, offset: i64) -> Page {
    Page::new(Some(limit), Some(offset)).expect("valid page")
}
