//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a path or query segment into a typed entity id.
pub(crate) fn parse_id<T: From<Uuid>>(value: &str, field: FieldName) -> Result<T, Error> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Turn JSON extractor failures into the shared error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
        .into()
}

/// Turn query-string extractor failures into the shared error envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, GameId};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde::Deserialize;

    #[rstest]
    fn parse_id_accepts_uuids() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: GameId = parse_id(raw, FieldName::new("id")).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn parse_id_reports_field_and_value() {
        let err = parse_id::<GameId>("nope", FieldName::new("gameId")).expect_err("invalid id");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "gameId must be a valid UUID");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "gameId", "value": "nope", "code": "invalid_uuid"}))
        );
    }

    #[derive(Deserialize)]
    struct Body {
        #[expect(dead_code, reason = "only deserialised")]
        name: String,
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_error_envelope() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(
                    "/",
                    web::post().to(|_: web::Json<Body>| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_body");
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_query_uses_error_envelope() {
        #[derive(Deserialize)]
        struct Query {
            #[expect(dead_code, reason = "only deserialised")]
            limit: i64,
        }

        let app = actix_test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .route(
                    "/",
                    web::get().to(|_: web::Query<Query>| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/?limit=many").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_query");
    }
}
