//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the library repository
//! ports backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories hold parameterised SQL, a scan into the
//!   domain type, and nothing else.
//! - **One classifier**: every driver and pool failure passes through
//!   `diesel_helpers`, so all callers see the same `RepositoryError` kinds.
//! - **Ownership in the statement**: reads, updates and deletes embed the
//!   owner predicate from `ownership`; inserts of dependent rows select the
//!   parent under that predicate.
//! - **Internal models**: row structs in `models.rs` never leave this module.
//!
//! # Example
//!
//! ```ignore
//! use ludivault::outbound::persistence::{DbPool, DieselGameRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ludivault")).await?;
//! let games = DieselGameRepository::new(pool);
//! ```

mod diesel_game_repository;
pub(crate) mod diesel_helpers;
mod diesel_note_repository;
mod diesel_platform_repository;
mod diesel_playthrough_repository;
mod diesel_user_repository;
mod filtered_query;
mod migrations;
mod models;
mod ownership;
mod pool;

pub use diesel_game_repository::DieselGameRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_platform_repository::DieselPlatformRepository;
pub use diesel_playthrough_repository::DieselPlaythroughRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
