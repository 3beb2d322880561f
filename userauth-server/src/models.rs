//! Request and response models for userauth-server

use serde::{Deserialize, Serialize};

/// Body of `POST /verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub username: String,
    pub hashed_password: String,
}

/// Uniform verification envelope: match, no-match, validation failure, and
/// internal failure all use this shape with status 200. The error message
/// never reveals whether the username or the password was wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub user_id: Option<i64>,
    pub error_message: Option<String>,
}

impl VerifyResponse {
    pub fn matched(user_id: i64) -> Self {
        Self {
            success: true,
            user_id: Some(user_id),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user_id: None,
            error_message: Some(message.into()),
        }
    }
}

/// Body of `GET /ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
