//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod games;
pub mod health;
pub mod notes;
pub mod page;
pub mod platforms;
pub mod playthroughs;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every handler served under `/api/v1`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use ludivault::inbound::http::api_routes;
///
/// let app = App::new().service(web::scope("/api/v1").configure(api_routes));
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(platforms::list_platforms)
        .service(platforms::get_platform)
        .service(platforms::create_platform)
        .service(platforms::update_platform)
        .service(platforms::delete_platform)
        .service(games::list_games)
        .service(games::get_game)
        .service(games::create_game)
        .service(games::update_game)
        .service(games::delete_game)
        .service(games::list_game_playthroughs)
        .service(games::list_game_notes)
        .service(playthroughs::list_playthroughs)
        .service(playthroughs::get_playthrough)
        .service(playthroughs::create_playthrough)
        .service(playthroughs::update_playthrough)
        .service(playthroughs::delete_playthrough)
        .service(notes::get_note)
        .service(notes::create_note)
        .service(notes::update_note)
        .service(notes::delete_note)
        .service(auth::providers)
        .service(auth::login)
        .service(auth::callback)
        .service(auth::logout)
        .service(auth::me);
}
