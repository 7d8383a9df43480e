use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};

use crate::models::{signup::SignupPayload, submission::Resolution};
use crate::state::AppState;

fn into_http(resolution: Resolution) -> Response {
    (resolution.disposition.status_code(), Json(resolution.result)).into_response()
}

fn unreadable_body(state: &AppState, rejection: JsonRejection) -> Response {
    into_http(
        state
            .waitlist
            .resolver()
            .unreadable_request(&rejection.body_text()),
    )
}

/// Resolves the signup and sends the welcome email.
pub async fn handle_join_waitlist(
    State(state): State<AppState>,
    payload: Result<Json<SignupPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => into_http(state.waitlist.join(&payload).await),
        Err(rejection) => unreadable_body(&state, rejection),
    }
}

/// Resolves the signup only; the caller sends the email separately.
pub async fn handle_submission(
    State(state): State<AppState>,
    payload: Result<Json<SignupPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => into_http(state.waitlist.resolver().resolve(&payload).await),
        Err(rejection) => unreadable_body(&state, rejection),
    }
}
