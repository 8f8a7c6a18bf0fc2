//! Playthrough API handlers.
//!
//! ```text
//! GET    /api/v1/playthroughs?gameId=…&limit=20
//! GET    /api/v1/playthroughs/{id}
//! POST   /api/v1/playthroughs {"gameId":"…","startDate":"2024-05-01T00:00:00Z","status":"inProgress"}
//! PUT    /api/v1/playthroughs/{id}
//! DELETE /api/v1/playthroughs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AssignId, Error, FieldError, GameId, Page, Playthrough, PlaythroughDraft, PlaythroughId,
    PlaythroughStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for creating or replacing a playthrough.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaythroughRequest {
    pub game_id: GameId,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub status: PlaythroughStatus,
    #[serde(default)]
    pub runtime_minutes: Option<i32>,
}

impl TryFrom<PlaythroughRequest> for PlaythroughDraft {
    type Error = FieldError;

    fn try_from(value: PlaythroughRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.game_id,
            value.start_date,
            value.end_date,
            value.status,
            value.runtime_minutes,
        )
    }
}

/// Optional game filter plus paging.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlaythroughListQuery {
    /// Only playthroughs of this game.
    pub game_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn playthrough_id(raw: &str) -> Result<PlaythroughId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// List the caller's playthroughs, newest start first.
#[utoipa::path(
    get,
    path = "/api/v1/playthroughs",
    params(PlaythroughListQuery),
    responses(
        (status = 200, description = "Playthroughs", body = [Playthrough]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["playthroughs"],
    operation_id = "listPlaythroughs",
    security(("SessionCookie" = []))
)]
#[get("/playthroughs")]
pub async fn list_playthroughs(
    state: web::Data<HttpState>,
    user: CurrentUser,
    query: web::Query<PlaythroughListQuery>,
) -> ApiResult<web::Json<Vec<Playthrough>>> {
    let game_id = query
        .game_id
        .as_deref()
        .map(|raw| parse_id::<GameId>(raw, FieldName::new("gameId")))
        .transpose()?;
    let page = Page::new(query.limit, query.offset)?;
    let playthroughs = state.playthroughs.list(user.id(), game_id, page).await?;
    Ok(web::Json(playthroughs))
}

/// Fetch one playthrough.
#[utoipa::path(
    get,
    path = "/api/v1/playthroughs/{id}",
    params(("id" = String, Path, description = "Playthrough id")),
    responses(
        (status = 200, description = "Playthrough", body = Playthrough),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["playthroughs"],
    operation_id = "getPlaythrough",
    security(("SessionCookie" = []))
)]
#[get("/playthroughs/{id}")]
pub async fn get_playthrough(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Playthrough>> {
    let playthrough = state
        .playthroughs
        .get(playthrough_id(&path)?, user.id())
        .await?;
    Ok(web::Json(playthrough))
}

/// Start tracking a playthrough of one of the caller's games.
#[utoipa::path(
    post,
    path = "/api/v1/playthroughs",
    request_body = PlaythroughRequest,
    responses(
        (status = 201, description = "Created", body = Playthrough),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Game not found", body = Error)
    ),
    tags = ["playthroughs"],
    operation_id = "createPlaythrough",
    security(("SessionCookie" = []))
)]
#[post("/playthroughs")]
pub async fn create_playthrough(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<PlaythroughRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PlaythroughDraft::try_from(payload.into_inner())?;
    let playthrough = state.playthroughs.create(draft, user.id()).await?;
    Ok(HttpResponse::Created().json(playthrough))
}

/// Replace a playthrough's fields.
#[utoipa::path(
    put,
    path = "/api/v1/playthroughs/{id}",
    params(("id" = String, Path, description = "Playthrough id")),
    request_body = PlaythroughRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Playthrough or game not found", body = Error)
    ),
    tags = ["playthroughs"],
    operation_id = "updatePlaythrough",
    security(("SessionCookie" = []))
)]
#[put("/playthroughs/{id}")]
pub async fn update_playthrough(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<PlaythroughRequest>,
) -> ApiResult<HttpResponse> {
    let id = playthrough_id(&path)?;
    let playthrough = PlaythroughDraft::try_from(payload.into_inner())?.assign_id(id);
    state.playthroughs.update(&playthrough, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a playthrough.
#[utoipa::path(
    delete,
    path = "/api/v1/playthroughs/{id}",
    params(("id" = String, Path, description = "Playthrough id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["playthroughs"],
    operation_id = "deletePlaythrough",
    security(("SessionCookie" = []))
)]
#[delete("/playthroughs/{id}")]
pub async fn delete_playthrough(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .playthroughs
        .delete(playthrough_id(&path)?, user.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
