use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tickerbrief_core::{SourceError, SourceErrorKind};
use tracing::{error, warn};

/// Request failure rendered as `{"error": message}`.
#[derive(Debug, Error)]
#[error("{}", .0.message())]
pub struct ApiError(#[from] SourceError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn source_error(&self) -> &SourceError {
        &self.0
    }

    pub const fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            SourceErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            SourceErrorKind::SymbolNotFound
            | SourceErrorKind::InvalidSymbol
            | SourceErrorKind::NoDataAvailable => StatusCode::NOT_FOUND,
            SourceErrorKind::DivisionByZero => StatusCode::UNPROCESSABLE_ENTITY,
            SourceErrorKind::UpstreamUnavailable
            | SourceErrorKind::MalformedResponse
            | SourceErrorKind::TextGenerationUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0.message(), "stock request failed");
        } else {
            warn!(code = self.0.code(), error = %self.0.message(), "stock request rejected");
        }

        let body = ErrorBody {
            error: self.0.message(),
        };
        (status, Json(body)).into_response()
    }
}
