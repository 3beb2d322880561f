//! Credential verification route.
//!
//! Every outcome (match, no-match, missing fields, storage failure) is a
//! 200 with the same envelope shape. Validation problems are not 4xx here,
//! and a mismatch response never says whether the username or the password
//! was wrong.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::models::{VerifyRequest, VerifyResponse};
use crate::state::AppState;

const MISSING_FIELDS: &str = "Username and hashed password are required";
const INVALID_CREDENTIALS: &str = "Invalid username or password";
const LOOKUP_FAILED: &str = "An error occurred during authentication";

/// POST /verify - Check a (username, hashedPassword) pair
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Json<VerifyResponse> {
    // Malformed or incomplete bodies get the validation envelope, not a 4xx.
    let Ok(Json(req)) = payload else {
        return Json(VerifyResponse::failure(MISSING_FIELDS));
    };
    if req.username.is_empty() || req.hashed_password.is_empty() {
        return Json(VerifyResponse::failure(MISSING_FIELDS));
    }

    match state.store().lookup(&req.username, &req.hashed_password) {
        Ok(Some(id)) => Json(VerifyResponse::matched(id)),
        Ok(None) => Json(VerifyResponse::failure(INVALID_CREDENTIALS)),
        Err(err) => {
            tracing::error!("Error during user authentication: {}", err);
            Json(VerifyResponse::failure(LOOKUP_FAILED))
        }
    }
}
