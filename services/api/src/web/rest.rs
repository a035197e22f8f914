//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use gym_trainer_core::advice::calculate_macros;
use gym_trainer_core::domain::{Profile, ProgressEntry};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        create_profile_handler,
        get_profile_handler,
        get_macros_handler,
        crate::web::chat::chat_handler,
        add_progress_handler,
        get_progress_handler,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            ErrorDetail,
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::LoginResponse,
            CreateProfileRequest,
            crate::web::chat::ChatRequest,
            AddProgressRequest,
            ProgressEntryResponse,
        )
    ),
    tags(
        (name = "Gym Trainer API", description = "API endpoints for the AI gym trainer backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Response and Payload Structs
//=========================================================================================

/// The generic success payload for write endpoints.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// The client-facing error payload: a single human-readable detail string.
#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn bad_request(detail: impl Into<String>) -> (StatusCode, Json<ErrorDetail>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail {
                detail: detail.into(),
            }),
        )
    }

    pub fn unauthorized(detail: impl Into<String>) -> (StatusCode, Json<ErrorDetail>) {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDetail {
                detail: detail.into(),
            }),
        )
    }

    pub fn not_found(detail: impl Into<String>) -> (StatusCode, Json<ErrorDetail>) {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDetail {
                detail: detail.into(),
            }),
        )
    }

    pub fn internal(detail: impl Into<String>) -> (StatusCode, Json<ErrorDetail>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: detail.into(),
            }),
        )
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub user_id: Uuid,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddProgressRequest {
    pub user_id: Uuid,
    pub weight: f64,
    pub goal: String,
}

#[derive(Serialize, ToSchema)]
pub struct ProgressEntryResponse {
    pub user_id: Uuid,
    pub weight: f64,
    pub goal: String,
    pub date: DateTime<Utc>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// GET / - Health check
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Gym trainer backend is running".to_string(),
    })
}

/// POST /profile/create - Create or wholesale-overwrite a user's profile
#[utoipa::path(
    post,
    path = "/profile/create",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = MessageResponse),
        (status = 400, description = "Store rejected the profile", body = ErrorDetail)
    )
)]
pub async fn create_profile_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorDetail>)> {
    let profile = Profile {
        user_id: req.user_id,
        age: req.age,
        height_cm: req.height_cm,
        weight_kg: req.weight_kg,
        sex: req.sex,
        activity_level: req.activity_level,
        goal: req.goal,
    };

    state.db.upsert_profile(&profile).await.map_err(|e| {
        error!("Failed to upsert profile: {:?}", e);
        ErrorDetail::bad_request(format!("Profile creation failed: {}", e))
    })?;

    Ok(Json(MessageResponse {
        message: "Profile saved!".to_string(),
    }))
}

/// GET /profile/{user_id} - Fetch a user's profile, or an empty object if none exists
#[utoipa::path(
    get,
    path = "/profile/{user_id}",
    params(("user_id" = Uuid, Path, description = "The unique ID of the user.")),
    responses(
        (status = 200, description = "The profile object, or {} when absent"),
        (status = 500, description = "Store failure", body = ErrorDetail)
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorDetail>)> {
    let profile = state.db.get_profile(user_id).await.map_err(|e| {
        error!("Failed to fetch profile: {:?}", e);
        ErrorDetail::internal(format!("Error fetching profile: {}", e))
    })?;

    match profile {
        Some(p) => Ok(Json(json!({
            "user_id": p.user_id,
            "age": p.age,
            "height_cm": p.height_cm,
            "weight_kg": p.weight_kg,
            "sex": p.sex,
            "activity_level": p.activity_level,
            "goal": p.goal,
        }))),
        None => Ok(Json(json!({}))),
    }
}

/// GET /macros/{user_id} - Daily macro targets derived from the stored profile weight
#[utoipa::path(
    get,
    path = "/macros/{user_id}",
    params(("user_id" = Uuid, Path, description = "The unique ID of the user.")),
    responses(
        (status = 200, description = "Macro targets in grams"),
        (status = 404, description = "No profile for this user", body = ErrorDetail),
        (status = 500, description = "Store failure", body = ErrorDetail)
    )
)]
pub async fn get_macros_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorDetail>)> {
    let profile = state.db.get_profile(user_id).await.map_err(|e| {
        error!("Failed to fetch profile for macros: {:?}", e);
        ErrorDetail::internal(format!("Error calculating macros: {}", e))
    })?;

    // Macros are always derived from the stored weight, never a request value.
    match profile {
        Some(p) => Ok(Json(calculate_macros(p.weight_kg))),
        None => Err(ErrorDetail::not_found("Profile not found")),
    }
}

/// POST /progress/add - Append a weight check-in; the server stamps the date
#[utoipa::path(
    post,
    path = "/progress/add",
    request_body = AddProgressRequest,
    responses(
        (status = 200, description = "Entry recorded", body = MessageResponse),
        (status = 400, description = "Store rejected the entry", body = ErrorDetail)
    )
)]
pub async fn add_progress_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddProgressRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorDetail>)> {
    let entry = ProgressEntry {
        user_id: req.user_id,
        weight: req.weight,
        goal: req.goal,
        date: Utc::now(),
    };

    state.db.add_progress_entry(&entry).await.map_err(|e| {
        error!("Failed to add progress entry: {:?}", e);
        ErrorDetail::bad_request(format!("Progress addition failed: {}", e))
    })?;

    Ok(Json(MessageResponse {
        message: "Progress added successfully!".to_string(),
    }))
}

/// GET /progress/{user_id} - All check-ins for a user, ascending by date
#[utoipa::path(
    get,
    path = "/progress/{user_id}",
    params(("user_id" = Uuid, Path, description = "The unique ID of the user.")),
    responses(
        (status = 200, description = "Entries ordered by date", body = [ProgressEntryResponse]),
        (status = 500, description = "Store failure", body = ErrorDetail)
    )
)]
pub async fn get_progress_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ProgressEntryResponse>>, (StatusCode, Json<ErrorDetail>)> {
    let entries = state.db.get_progress_for_user(user_id).await.map_err(|e| {
        error!("Failed to fetch progress: {:?}", e);
        ErrorDetail::internal(format!("Error fetching progress: {}", e))
    })?;

    let body = entries
        .into_iter()
        .map(|e| ProgressEntryResponse {
            user_id: e.user_id,
            weight: e.weight,
            goal: e.goal,
            date: e.date,
        })
        .collect();

    Ok(Json(body))
}
