use std::sync::Arc;

use crate::config::Config;
use crate::customize::store::CustomizationStore;
use crate::extract::TextExtractor;
use crate::llm_client::AiResponder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Collaborators sit behind trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<dyn TextExtractor>,
    pub ai: Arc<dyn AiResponder>,
    pub store: Arc<dyn CustomizationStore>,
}
