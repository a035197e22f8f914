//! services/api/src/web/chat.rs
//!
//! The chat orchestrator: loads the profile, renders the prompt, calls the
//! advice model once, validates its reply, and degrades to the deterministic
//! fallback on any failure. Chat is a best-effort enrichment feature, so this
//! handler never surfaces an error to the client.

use axum::{extract::State, response::Json};
use gym_trainer_core::advice::{
    build_advice_prompt, fallback_advice, profile_incomplete_advice, validate_model_reply,
};
use gym_trainer_core::domain::AdvicePayload;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

/// Single attempt, hard deadline. Expiry is handled exactly like a failed call.
const ADVICE_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    pub user_id: Uuid,
    pub message: String,
}

/// POST /chat - Personalized fitness advice, always a complete payload
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "An advice payload, from the model or the fallback")
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<AdvicePayload> {
    // The entry gate: no profile means no personalization is possible, so the
    // dedicated setup payload goes out before any prompt is built.
    let profile = match state.db.get_profile(req.user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return Json(profile_incomplete_advice()),
        Err(e) => {
            error!("Failed to load profile for chat: {:?}", e);
            return Json(fallback_advice(None, &req.message));
        }
    };

    let prompt = build_advice_prompt(&profile, &req.message);

    let started = Instant::now();
    let reply = tokio::time::timeout(
        ADVICE_CALL_TIMEOUT,
        state.advice_model.generate_advice(&prompt),
    )
    .await;
    info!("⏱️ Advice model call took: {:?}", started.elapsed());

    let raw = match reply {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            error!("Advice model call failed: {}", e);
            return Json(fallback_advice(Some(&profile), &req.message));
        }
        Err(_) => {
            warn!(
                "Advice model call exceeded {:?}, serving fallback",
                ADVICE_CALL_TIMEOUT
            );
            return Json(fallback_advice(Some(&profile), &req.message));
        }
    };

    match validate_model_reply(&raw) {
        Ok(payload) => Json(payload),
        Err(e) => {
            warn!("Model reply rejected ({}), serving fallback", e);
            Json(fallback_advice(Some(&profile), &req.message))
        }
    }
}
