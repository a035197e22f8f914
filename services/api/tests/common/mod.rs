//! Shared test harness: in-memory mock ports and app construction.

use api_lib::config::Config;
use api_lib::web::router;
use api_lib::web::state::AppState;
use async_trait::async_trait;
use axum::Router;
use gym_trainer_core::domain::{Profile, ProgressEntry, User, UserCredentials};
use gym_trainer_core::ports::{
    AdviceModelService, DatabaseService, PortError, PortResult,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::Level;
use uuid::Uuid;

//=========================================================================================
// In-Memory Database Mock
//=========================================================================================

/// An in-memory stand-in for the Postgres adapter. Mirrors the store-side
/// contracts the handlers rely on: unique emails and date-ascending progress
/// listings.
#[derive(Default)]
pub struct MockDb {
    users: Mutex<Vec<(User, String)>>,
    profiles: Mutex<HashMap<Uuid, Profile>>,
    progress: Mutex<Vec<ProgressEntry>>,
}

#[async_trait]
impl DatabaseService for MockDb {
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == email) {
            return Err(PortError::Conflict("email is already registered".to_string()));
        }
        let user = User {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
        };
        users.push((user.clone(), hashed_password.to_string()));
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                user_id: u.user_id,
                email: u.email.clone(),
                hashed_password: hash.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }

    async fn upsert_profile(&self, profile: &Profile) -> PortResult<()> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> PortResult<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn add_progress_entry(&self, entry: &ProgressEntry) -> PortResult<()> {
        self.progress.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn get_progress_for_user(&self, user_id: Uuid) -> PortResult<Vec<ProgressEntry>> {
        let mut entries: Vec<ProgressEntry> = self
            .progress
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }
}

//=========================================================================================
// Scripted Advice Model Mock
//=========================================================================================

/// What the mock model should do when the orchestrator calls it.
#[allow(dead_code)]
pub enum ScriptedReply {
    Text(String),
    Error,
}

pub struct MockAdviceModel {
    reply: ScriptedReply,
    calls: AtomicUsize,
}

impl MockAdviceModel {
    pub fn new(reply: ScriptedReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceModelService for MockAdviceModel {
    async fn generate_advice(&self, _prompt: &str) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Error => Err(PortError::Unexpected("model offline".to_string())),
        }
    }
}

//=========================================================================================
// App Construction
//=========================================================================================

#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        log_level: Level::INFO,
        openai_api_key: None,
        advice_model: "test-model".to_string(),
    }
}

/// Create a test app with in-memory mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(reply: ScriptedReply) -> (Router, Arc<AppState>) {
    let model = Arc::new(MockAdviceModel::new(reply));
    create_test_app_with_model(model)
}

/// Same as `create_test_app` but keeps a handle on the model mock so tests
/// can assert on call counts.
#[allow(dead_code)]
pub fn create_test_app_with_model(model: Arc<MockAdviceModel>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        db: Arc::new(MockDb::default()),
        config: Arc::new(test_config()),
        advice_model: model,
    });
    (router(state.clone()), state)
}

//=========================================================================================
// Request Helpers
//=========================================================================================

/// Read a response body and parse it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Response body was not valid JSON")
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request.
#[allow(dead_code)]
pub fn get(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}
