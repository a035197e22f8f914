//! crates/gym_trainer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Profile, ProgressEntry, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        hashed_password: &str,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    // --- Profile Management ---
    /// Creates or wholesale-overwrites the profile for `profile.user_id`.
    async fn upsert_profile(&self, profile: &Profile) -> PortResult<()>;

    /// Absence of a profile is a normal outcome here, not an error; the chat
    /// and macros endpoints branch on it.
    async fn get_profile(&self, user_id: Uuid) -> PortResult<Option<Profile>>;

    // --- Progress Tracking ---
    async fn add_progress_entry(&self, entry: &ProgressEntry) -> PortResult<()>;

    /// Returns all entries for the user, ordered ascending by date.
    async fn get_progress_for_user(&self, user_id: Uuid) -> PortResult<Vec<ProgressEntry>>;
}

#[async_trait]
pub trait AdviceModelService: Send + Sync {
    /// Sends a fully-rendered instruction prompt to the advice model and
    /// returns its raw text reply. Validation of that text happens in the
    /// caller; this port is strictly prompt-in/text-out.
    async fn generate_advice(&self, prompt: &str) -> PortResult<String>;
}
