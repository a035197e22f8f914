//! crates/gym_trainer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or web framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Represents a user account - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

/// A user's body/goal attributes, keyed one-to-one by user id.
/// Created and overwritten wholesale; read by the macro and chat endpoints.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: Uuid,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
}

/// A single append-only weight check-in. `date` is assigned server-side.
#[derive(Debug, Clone)]
pub struct ProgressEntry {
    pub user_id: Uuid,
    pub weight: f64,
    pub goal: String,
    pub date: DateTime<Utc>,
}

/// Daily macro targets in grams.
///
/// Carries serde derives because it doubles as the `macros` object inside the
/// advice model's JSON reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// The structured result of the chat capability, whether it came from the
/// advice model or from the deterministic fallback. Never persisted.
///
/// Deserialization doubles as the model-reply schema check: a reply missing
/// any of the five fields, or carrying wrong-typed values, does not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvicePayload {
    pub response: String,
    pub advice: String,
    pub workout_plan: Vec<String>,
    pub nutrition_tips: String,
    pub macros: MacroTargets,
}
