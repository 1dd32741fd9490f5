use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum::response::IntoResponse;
use serde::Serialize;
use shared::UserProfile;
use uuid::Uuid;

use crate::{
    auth::{session_token, PasswordHasher},
    error::{ApiError, ApiResult},
    response::ApiResponse,
    state::AppState,
    validation::{LoginBody, RegisterBody},
};

fn map_json_rejection(err: JsonRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid JSON payload: {}", err.body_text()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    id: Uuid,
    email: String,
    name: String,
    session_token: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.map_err(map_json_rejection)?;
    let registration = body.validate().map_err(ApiError::validation)?;

    if state
        .users
        .find_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = PasswordHasher::hash(&registration.password);
    // A concurrent registration for the same email loses the race on the
    // unique index and normalizes to 409.
    let user = state
        .users
        .create(&registration.email, &password_hash, &registration.name)
        .await?;

    Ok(ApiResponse::created(
        "User registered successfully",
        Some(UserProfile::from(user)),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.map_err(map_json_rejection)?;
    let credentials = body.validate().map_err(ApiError::validation)?;

    // Same message for unknown email and bad password: don't leak which
    // part was wrong.
    let unauthorized = || ApiError::unauthorized("Email or password is incorrect");

    let user = state
        .users
        .find_by_email(&credentials.email)
        .await?
        .ok_or_else(unauthorized)?;

    if !PasswordHasher::verify(&credentials.password, &user.password_hash) {
        return Err(unauthorized());
    }

    let data = LoginData {
        id: user.id,
        email: user.email,
        name: user.name,
        session_token: session_token(),
    };
    Ok(ApiResponse::ok("Login successful", Some(data)))
}

/// POST /api/auth/logout
pub async fn logout() -> ApiResult<impl IntoResponse> {
    // Stateless sessions: the client discards its token, nothing to do here.
    Ok(ApiResponse::ok("Logged out successfully", None::<()>))
}
