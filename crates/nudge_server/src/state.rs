//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use nudge_runtime::ConversationRunner;

/// Cloned into every handler; the runner is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<ConversationRunner>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(runner: Arc<ConversationRunner>) -> Self {
        Self {
            runner,
            started_at: Instant::now(),
        }
    }
}
