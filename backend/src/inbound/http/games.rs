//! Game API handlers, including the per-game playthrough and note listings.
//!
//! ```text
//! GET    /api/v1/games?title=zelda&owned=true&inProgress=false
//! GET    /api/v1/games/{id}
//! POST   /api/v1/games {"platformId":"…","title":"Celeste","owned":true,"released":true}
//! PUT    /api/v1/games/{id}
//! DELETE /api/v1/games/{id}
//! GET    /api/v1/games/{id}/playthroughs
//! GET    /api/v1/games/{id}/notes
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AssignId, Error, FieldError, Game, GameDraft, GameFilter, GameId, NoteSummary, Page,
    PlatformId, Playthrough,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::page::PageQuery;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for creating or replacing a game.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub platform_id: PlatformId,
    #[schema(example = "Celeste")]
    pub title: String,
    #[serde(default)]
    pub owned: bool,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub released: bool,
}

impl TryFrom<GameRequest> for GameDraft {
    type Error = FieldError;

    fn try_from(value: GameRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.platform_id,
            &value.title,
            value.owned,
            value.release_date,
            value.released,
        )
    }
}

/// Filters and paging for the game list; unset filters match everything.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GameListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub owned: Option<bool>,
    pub released: Option<bool>,
    /// Whether the game has a playthrough currently in progress.
    pub in_progress: Option<bool>,
}

impl GameListQuery {
    fn split(&self) -> Result<(GameFilter, Page), Error> {
        let page = Page::new(self.limit, self.offset)?;
        let filter = GameFilter::new(
            self.title.as_deref(),
            self.owned,
            self.released,
            self.in_progress,
        );
        Ok((filter, page))
    }
}

fn game_id(raw: &str) -> Result<GameId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// List the caller's games matching every supplied filter.
#[utoipa::path(
    get,
    path = "/api/v1/games",
    params(GameListQuery),
    responses(
        (status = 200, description = "Games", body = [Game]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["games"],
    operation_id = "listGames",
    security(("SessionCookie" = []))
)]
#[get("/games")]
pub async fn list_games(
    state: web::Data<HttpState>,
    user: CurrentUser,
    query: web::Query<GameListQuery>,
) -> ApiResult<web::Json<Vec<Game>>> {
    let (filter, page) = query.split()?;
    let games = state.games.list(user.id(), &filter, page).await?;
    Ok(web::Json(games))
}

/// Fetch one game.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game", body = Game),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "getGame",
    security(("SessionCookie" = []))
)]
#[get("/games/{id}")]
pub async fn get_game(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Game>> {
    let game = state.games.get(game_id(&path)?, user.id()).await?;
    Ok(web::Json(game))
}

/// Create a game on one of the caller's platforms.
#[utoipa::path(
    post,
    path = "/api/v1/games",
    request_body = GameRequest,
    responses(
        (status = 201, description = "Created", body = Game),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Platform not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "createGame",
    security(("SessionCookie" = []))
)]
#[post("/games")]
pub async fn create_game(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<GameRequest>,
) -> ApiResult<HttpResponse> {
    let draft = GameDraft::try_from(payload.into_inner())?;
    let game = state.games.create(draft, user.id()).await?;
    Ok(HttpResponse::Created().json(game))
}

/// Replace a game's fields.
#[utoipa::path(
    put,
    path = "/api/v1/games/{id}",
    params(("id" = String, Path, description = "Game id")),
    request_body = GameRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Game or platform not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "updateGame",
    security(("SessionCookie" = []))
)]
#[put("/games/{id}")]
pub async fn update_game(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<GameRequest>,
) -> ApiResult<HttpResponse> {
    let id = game_id(&path)?;
    let game = GameDraft::try_from(payload.into_inner())?.assign_id(id);
    state.games.update(&game, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a game with its playthroughs and notes.
#[utoipa::path(
    delete,
    path = "/api/v1/games/{id}",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "deleteGame",
    security(("SessionCookie" = []))
)]
#[delete("/games/{id}")]
pub async fn delete_game(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.games.delete(game_id(&path)?, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List playthroughs of one game, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}/playthroughs",
    params(("id" = String, Path, description = "Game id"), PageQuery),
    responses(
        (status = 200, description = "Playthroughs", body = [Playthrough]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["games"],
    operation_id = "listGamePlaythroughs",
    security(("SessionCookie" = []))
)]
#[get("/games/{id}/playthroughs")]
pub async fn list_game_playthroughs(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<Playthrough>>> {
    let id = game_id(&path)?;
    let page = query.page()?;
    let playthroughs = state.playthroughs.list(user.id(), Some(id), page).await?;
    Ok(web::Json(playthroughs))
}

/// List note titles of one game, pinned first.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}/notes",
    params(("id" = String, Path, description = "Game id"), PageQuery),
    responses(
        (status = 200, description = "Note summaries", body = [NoteSummary]),
        (status = 400, description = "Invalid id", body = Error)
    ),
    tags = ["games"],
    operation_id = "listGameNotes",
    security(("SessionCookie" = []))
)]
#[get("/games/{id}/notes")]
pub async fn list_game_notes(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<NoteSummary>>> {
    let id = game_id(&path)?;
    let page = query.page()?;
    let notes = state.notes.list_titles(id, user.id(), page).await?;
    Ok(web::Json(notes))
}
