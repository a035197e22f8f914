//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use gym_trainer_core::ports::{AdviceModelService, DatabaseService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// This layer holds no per-request state: identity arrives explicitly with
/// every request and all consistency concerns live in the store.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub advice_model: Arc<dyn AdviceModelService>,
}
