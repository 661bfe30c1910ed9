use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// User-facing message for any failure to reach the backing store
pub const DB_CONNECTION_ERROR_MESSAGE: &str =
    "Database connection error. Please check your database connection.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

/// SQLSTATE codes Postgres reports when the server cannot serve the session:
/// class 08 (connection exception) and the 57P0x shutdown/startup states.
fn is_connection_sqlstate(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03")
}

impl AppError {
    /// True when the store could not be reached at all, as opposed to a
    /// query that reached the store and failed there.
    pub fn is_connectivity(&self) -> bool {
        match self {
            AppError::Database(
                sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed,
            ) => true,
            AppError::Database(sqlx::Error::Database(e)) => e
                .code()
                .is_some_and(|code| is_connection_sqlstate(&code)),
            _ => false,
        }
    }

    /// Substitutes `fallback` when the error would reach the client with an
    /// empty message
    pub fn or_message(self, fallback: &str) -> Self {
        match self {
            not_found @ AppError::NotFound(_) => not_found,
            other if other.public_message().trim().is_empty() => {
                tracing::error!("Store failure without a message: {:?}", other);
                AppError::Internal(fallback.to_string())
            }
            other => other,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    ///
    /// Errors returned by the database server forward the server's own
    /// message, without sqlx's prefix.
    pub fn public_message(&self) -> String {
        match self {
            _ if self.is_connectivity() => DB_CONNECTION_ERROR_MESSAGE.to_string(),
            AppError::Database(sqlx::Error::Database(e)) => e.message().to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = Json(ApiResponse::<()>::error(self.public_message()));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
