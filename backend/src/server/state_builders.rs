//! Builders for HTTP state backed by the Diesel repositories.

use std::sync::Arc;

use actix_web::web;

use ludivault::domain::LoginProviders;
use ludivault::inbound::http::state::{HttpState, HttpStatePorts};
use ludivault::outbound::persistence::{
    DbPool, DieselGameRepository, DieselNoteRepository, DieselPlatformRepository,
    DieselPlaythroughRepository, DieselUserRepository,
};

/// Wire every repository port to its Diesel adapter over `pool`.
fn build_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts {
        platforms: Arc::new(DieselPlatformRepository::new(pool.clone())),
        games: Arc::new(DieselGameRepository::new(pool.clone())),
        playthroughs: Arc::new(DieselPlaythroughRepository::new(pool.clone())),
        notes: Arc::new(DieselNoteRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
    }
}

/// Build the shared handler state.
pub fn build_http_state(pool: &DbPool, login: LoginProviders) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_ports(pool), login))
}
