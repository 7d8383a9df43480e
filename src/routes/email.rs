use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::models::email::{DispatchResponse, EmailDispatchRequest};
use crate::responses::JsonResponse;
use crate::services::mailer::MailError;
use crate::state::AppState;

pub async fn handle_send_welcome_email(
    State(state): State<AppState>,
    request: Result<Json<EmailDispatchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            return JsonResponse::bad_request(&rejection.body_text()).into_response();
        }
    };

    match state.waitlist.mailer().send_welcome_email(&request).await {
        Ok(email_id) => (StatusCode::OK, Json(DispatchResponse::sent(email_id))).into_response(),
        Err(MailError::NotConfigured) => {
            error!("RESEND_API_KEY environment variable is not set");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DispatchResponse::failed(MailError::NotConfigured.to_string())),
            )
                .into_response()
        }
        Err(err) => {
            error!(email = %request.email, error = %err, "email sending error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DispatchResponse::failed(format!("Failed to send email: {}", err))),
            )
                .into_response()
        }
    }
}
