//! Platform API handlers.
//!
//! ```text
//! GET    /api/v1/platforms?limit=20&offset=0
//! GET    /api/v1/platforms/{id}
//! POST   /api/v1/platforms {"name":"Nintendo Switch","shortName":"NSW"}
//! PUT    /api/v1/platforms/{id}
//! DELETE /api/v1/platforms/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AssignId, Error, FieldError, Platform, PlatformDraft, PlatformId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::page::PageQuery;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for creating or replacing a platform.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    #[schema(example = "Nintendo Switch")]
    pub name: String,
    #[schema(example = "NSW")]
    pub short_name: String,
}

impl TryFrom<PlatformRequest> for PlatformDraft {
    type Error = FieldError;

    fn try_from(value: PlatformRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, &value.short_name)
    }
}

fn platform_id(raw: &str) -> Result<PlatformId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// List the caller's platforms ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/platforms",
    params(PageQuery),
    responses(
        (status = 200, description = "Platforms", body = [Platform]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "listPlatforms",
    security(("SessionCookie" = []))
)]
#[get("/platforms")]
pub async fn list_platforms(
    state: web::Data<HttpState>,
    user: CurrentUser,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<Platform>>> {
    let page = query.page()?;
    let platforms = state.platforms.list(user.id(), page).await?;
    Ok(web::Json(platforms))
}

/// Fetch one platform.
#[utoipa::path(
    get,
    path = "/api/v1/platforms/{id}",
    params(("id" = String, Path, description = "Platform id")),
    responses(
        (status = 200, description = "Platform", body = Platform),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "getPlatform",
    security(("SessionCookie" = []))
)]
#[get("/platforms/{id}")]
pub async fn get_platform(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Platform>> {
    let id = platform_id(&path)?;
    let platform = state.platforms.get(id, user.id()).await?;
    Ok(web::Json(platform))
}

/// Create a platform; names are unique per user.
#[utoipa::path(
    post,
    path = "/api/v1/platforms",
    request_body = PlatformRequest,
    responses(
        (status = 201, description = "Created", body = Platform),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "createPlatform",
    security(("SessionCookie" = []))
)]
#[post("/platforms")]
pub async fn create_platform(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<PlatformRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PlatformDraft::try_from(payload.into_inner())?;
    let platform = state.platforms.create(draft, user.id()).await?;
    Ok(HttpResponse::Created().json(platform))
}

/// Replace a platform's fields.
#[utoipa::path(
    put,
    path = "/api/v1/platforms/{id}",
    params(("id" = String, Path, description = "Platform id")),
    request_body = PlatformRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Name already used", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "updatePlatform",
    security(("SessionCookie" = []))
)]
#[put("/platforms/{id}")]
pub async fn update_platform(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<PlatformRequest>,
) -> ApiResult<HttpResponse> {
    let id = platform_id(&path)?;
    let platform = PlatformDraft::try_from(payload.into_inner())?.assign_id(id);
    state.platforms.update(&platform, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a platform that no game refers to.
#[utoipa::path(
    delete,
    path = "/api/v1/platforms/{id}",
    params(("id" = String, Path, description = "Platform id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Platform still has games", body = Error)
    ),
    tags = ["platforms"],
    operation_id = "deletePlatform",
    security(("SessionCookie" = []))
)]
#[delete("/platforms/{id}")]
pub async fn delete_platform(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = platform_id(&path)?;
    state.platforms.delete(id, user.id()).await?;
    Ok(HttpResponse::NoContent().finish())
}
