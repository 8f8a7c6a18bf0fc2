//! Status codes and JSON bodies for domain errors.
//!
//! Internal errors reach the client as "Internal server error" with their
//! trace id only; the original message and details go to the log.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Client-facing copy of an internal error.
fn public_internal(error: &Error) -> Error {
    error!(
        message = error.message(),
        details = ?error.details(),
        trace_id = ?error.trace_id(),
        "request failed"
    );
    let public = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(trace_id) => public.with_trace_id(trace_id),
        None => public,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.code() {
            ErrorCode::InternalError => public_internal(self),
            _ => self.clone(),
        };
        let mut response = HttpResponse::build(self.status_code());
        if let Some(trace_id) = body.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        response.json(body)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, status = %err.as_response_error().status_code(), "framework error");
        Self::internal(INTERNAL_MESSAGE)
    }
}
