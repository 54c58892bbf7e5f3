//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month query parameter was missing or was not an English month name.
    #[error("invalid month \"{0}\", expected an English month name such as \"March\"")]
    InvalidMonth(String),

    /// A query parameter could not be parsed, e.g. `page=0` or `perPage=ten`.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The seed dataset could not be downloaded.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed dataset was downloaded but is not an array of transactions.
    #[error("could not parse seed data: {0}")]
    SeedParse(String),

    /// Two records in the seed dataset share the same ID.
    ///
    /// The store is left unchanged when this happens.
    #[error("the seed data contains a duplicate transaction ID")]
    DuplicateTransactionId,

    /// No route matches the request path.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The route exists but does not accept the request method, e.g. `POST /api/statistics`.
    #[error("the requested method is not allowed for this resource")]
    MethodNotAllowed,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("transaction.id") =>
            {
                Error::DuplicateTransactionId
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

/// The body of every error response, e.g. `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}
