use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct JsonResponse {
    pub status: String,
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    fn with_status(code: StatusCode, msg: &str) -> impl IntoResponse {
        let success = code.is_success();
        (
            code,
            Json(JsonResponse {
                status: if success { "success" } else { "error" }.to_string(),
                success,
                message: msg.to_string(),
            }),
        )
    }

    pub fn success(msg: &str) -> impl IntoResponse {
        Self::with_status(StatusCode::OK, msg)
    }

    pub fn not_found(msg: &str) -> impl IntoResponse {
        Self::with_status(StatusCode::NOT_FOUND, msg)
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        Self::with_status(StatusCode::BAD_REQUEST, msg)
    }
}
