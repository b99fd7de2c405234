use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced by the webtoon list facade and its two backends.
///
/// Validation failures and not-found are client errors re-rendered to the
/// caller; store and session faults are logged and returned as opaque 500s.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Title too long (max 80 characters).")]
    TitleTooLong,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown {field} value: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Webtoon not found")]
    NotFound,

    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl ListError {
    pub fn status(&self) -> StatusCode {
        match self {
            ListError::TitleTooLong
            | ListError::MissingField(_)
            | ListError::UnknownCategory { .. } => StatusCode::BAD_REQUEST,
            ListError::NotFound => StatusCode::NOT_FOUND,
            ListError::Db(_) | ListError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            (status, "internal server error".to_string()).into_response()
        } else {
            (status, self.to_string()).into_response()
        }
    }
}
