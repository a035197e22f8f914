//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup and login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use gym_trainer_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::rest::{ErrorDetail, MessageResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub access_token: String,
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /signup - Create a new user account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, description = "Signup rejected (e.g. duplicate email)", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorDetail>)> {
    // 1. Hash the password. Credentials are never stored in plaintext.
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ErrorDetail::internal("Failed to hash password")
        })?
        .to_string();

    // 2. Create the user in the database.
    let user = state
        .db
        .create_user(&req.email, &req.username, &password_hash)
        .await
        .map_err(|e| match e {
            PortError::Conflict(detail) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDetail {
                    detail: format!("Signup failed: {}", detail),
                }),
            ),
            other => {
                error!("Failed to create user: {:?}", other);
                ErrorDetail::internal("Signup failed")
            }
        })?;

    info!("Created user {} ({})", user.username, user.user_id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Signup successful!".to_string(),
        }),
    ))
}

/// POST /login - Exchange credentials for the user's id and an access token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorDetail),
        (status = 500, description = "Internal server error", body = ErrorDetail)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorDetail>)> {
    // 1. Look up the stored credentials by email. An unknown email reads the
    //    same as a bad password from the outside.
    let user_creds = state.db.get_user_by_email(&req.email).await.map_err(|e| {
        error!("Failed to get user: {:?}", e);
        ErrorDetail::unauthorized("Invalid credentials")
    })?;

    // 2. Verify the password against the stored argon2 hash.
    let parsed_hash = PasswordHash::new(&user_creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        ErrorDetail::internal("Authentication error")
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err(ErrorDetail::unauthorized("Invalid credentials"));
    }

    // 3. Hand the client an opaque token. Identity stays request-scoped on the
    //    backend; the token lives client-side alongside the user id.
    let access_token = Uuid::new_v4().to_string();

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            user_id: user_creds.user_id,
            access_token,
            message: "Login successful!".to_string(),
        }),
    ))
}
