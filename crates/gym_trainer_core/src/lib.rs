pub mod advice;
pub mod domain;
pub mod ports;

pub use advice::{
    build_advice_prompt, calculate_macros, fallback_advice, profile_incomplete_advice,
    validate_model_reply, ReplyError,
};
pub use domain::{AdvicePayload, MacroTargets, Profile, ProgressEntry, User, UserCredentials};
pub use ports::{AdviceModelService, DatabaseService, PortError, PortResult};
