//! Error types for userauth-server
//!
//! Only the seeding path returns errors as HTTP statuses. Verification
//! failures of every kind are reported through the uniform 200 envelope
//! in `routes::verify`, never as an error response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Seeding attempted against a read-only store
    #[error("database opened in read-only mode")]
    ReadOnly,

    /// The destructive replace failed; the transaction was rolled back
    #[error("seeding failed: {0}")]
    Seed(#[source] userauth_core::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::ReadOnly => (
                StatusCode::FORBIDDEN,
                "Database opened in read-only mode",
            ),
            ServerError::Seed(err) => {
                // Logged here; the client only sees a generic message.
                tracing::error!("Error creating database: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while creating the database",
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
