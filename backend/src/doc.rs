//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every library, login and health endpoint together
//! with the session cookie security scheme. Swagger UI serves it in debug
//! builds and the `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, Game, GameNote, NoteKind, NoteSummary, Platform, Playthrough,
    PlaythroughStatus, User,
};
use crate::inbound::http::auth::ProvidersResponse;
use crate::inbound::http::games::GameRequest;
use crate::inbound::http::notes::NoteRequest;
use crate::inbound::http::platforms::PlatformRequest;
use crate::inbound::http::playthroughs::PlaythroughRequest;

/// Name of the cookie carrying the encrypted session.
pub const SESSION_COOKIE_NAME: &str = "ludivault-session";

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by GET /api/v1/auth/callback.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ludivault API",
        description = "Track the platforms, games, playthroughs and notes of a personal game library."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::platforms::list_platforms,
        crate::inbound::http::platforms::get_platform,
        crate::inbound::http::platforms::create_platform,
        crate::inbound::http::platforms::update_platform,
        crate::inbound::http::platforms::delete_platform,
        crate::inbound::http::games::list_games,
        crate::inbound::http::games::get_game,
        crate::inbound::http::games::create_game,
        crate::inbound::http::games::update_game,
        crate::inbound::http::games::delete_game,
        crate::inbound::http::games::list_game_playthroughs,
        crate::inbound::http::games::list_game_notes,
        crate::inbound::http::playthroughs::list_playthroughs,
        crate::inbound::http::playthroughs::get_playthrough,
        crate::inbound::http::playthroughs::create_playthrough,
        crate::inbound::http::playthroughs::update_playthrough,
        crate::inbound::http::playthroughs::delete_playthrough,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::auth::providers,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::callback,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Platform,
        PlatformRequest,
        Game,
        GameRequest,
        Playthrough,
        PlaythroughRequest,
        PlaythroughStatus,
        GameNote,
        NoteSummary,
        NoteKind,
        NoteRequest,
        User,
        ProvidersResponse,
    )),
    tags(
        (name = "platforms", description = "Consoles and stores games are played on"),
        (name = "games", description = "The game library"),
        (name = "playthroughs", description = "Attempts at a game"),
        (name = "notes", description = "Notes and links attached to games"),
        (name = "auth", description = "Login through third-party providers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
