pub mod email;
pub mod waitlist;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::responses::JsonResponse;
use crate::state::AppState;

pub use email::handle_send_welcome_email;
pub use waitlist::{handle_join_waitlist, handle_submission};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/waitlist", post(handle_join_waitlist))
        .route("/api/google-sheets", post(handle_submission))
        .route("/api/send-welcome-email", post(handle_send_welcome_email))
        .fallback(not_found)
        .with_state(state)
}

/// A simple root route.
async fn root() -> Response {
    JsonResponse::success("Kolplay waitlist is running").into_response()
}

async fn not_found() -> Response {
    JsonResponse::not_found("Not found").into_response()
}
