use ai::clients::openai::Client as AIClient;
use standard_error::StandardError;
use std::sync::Arc;

use crate::{conf::settings, prelude::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub ai_client: Arc<AIClient>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let ai = AIClient::from_url(&settings.ai_key, &settings.ai_endpoint)
            .map_err(|_| StandardError::new("ERR-LLM-000"))?;
        Ok(AppState {
            ai_client: Arc::new(ai),
        })
    }
}
