// src/state.rs
use std::sync::Arc;

use crate::services::reply_policy::ReplyPolicy;

pub type SharedState = Arc<AppState>;

/// Read-only after startup; requests never write to it.
#[derive(Debug)]
pub struct AppState {
    pub policy: ReplyPolicy,
}

impl AppState {
    pub fn new(policy: ReplyPolicy) -> Self {
        Self { policy }
    }

    pub fn echo() -> Self {
        Self::new(ReplyPolicy::Echo)
    }
}
