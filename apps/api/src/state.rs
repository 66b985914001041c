use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::NarrativeGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Injected session store. Default: in-memory. Swap via SESSION_BACKEND env.
    pub store: Arc<dyn SessionStore>,
    /// Narrative generation seam. Disabled backend when no API key is set;
    /// strategy requests then always take the local synthesis path.
    pub generator: Arc<dyn NarrativeGenerator>,
    /// Kept for handlers that need runtime settings (none yet).
    #[allow(dead_code)]
    pub config: Config,
}
