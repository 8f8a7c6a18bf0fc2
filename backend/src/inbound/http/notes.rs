//! Note API handlers. Title listings live under `/games/{id}/notes`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, FieldError, GameId, GameNote, NoteDraft, NoteId, NoteKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for creating or replacing a note.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    pub game_id: GameId,
    #[schema(example = "Speedrun route")]
    pub title: String,
    #[serde(default)]
    pub value: String,
    pub kind: NoteKind,
    #[serde(default)]
    pub pinned: bool,
}

impl TryFrom<NoteRequest> for NoteDraft {
    type Error = FieldError;

    fn try_from(value: NoteRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.game_id,
            &value.title,
            value.value,
            value.kind,
            value.pinned,
        )
    }
}

fn note_id(raw: &str) -> Result<NoteId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Fetch one note with its body.
#[utoipa::path(
    get,
    path = "/api/v1/notes/{id}",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "Note", body = GameNote),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["notes"],
    operation_id = "getNote",
    security(("SessionCookie" = []))
)]
#[get("/notes/{id}")]
pub async fn get_note(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<GameNote>> {
    let note = state.notes.get(note_id(&path)?, user.id()).await?;
    Ok(web::Json(note))
}

/// Attach a note to one of the caller's games.
#[utoipa::path(
    post,
    path = "/api/v1/notes",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Created", body = GameNote),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Game not found", body = Error)
    ),
    tags = ["notes"],
    operation_id = "createNote",
    security(("SessionCookie" = []))
)]
#[post("/notes")]
pub async fn create_note(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<NoteRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NoteDraft::try_from(payload.into_inner())?;
    let note = state.notes.create(draft, user.id()).await?;
    Ok(HttpResponse::Created().json(note))
}

/// Replace a note's fields; its timestamp is kept.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{id}",
    params(("id" = String, Path, description = "Note id")),
    request_body = NoteRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Note or game not found", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNote",
    security(("SessionCookie" = []))
)]
#[put("/notes/{id}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<HttpResponse> {
    let id = note_id(&path)?;
    let draft = NoteDraft::try_from(payload.into_inner())?;
    state.notes.update(id, &draft, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a note.
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{id}",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote",
    security(("SessionCookie" = []))
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.notes.delete(note_id(&path)?, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}
