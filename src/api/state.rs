// src/api/state.rs
use crate::config::AppConfig;
use crate::evaluator::EvaluationClient;
use crate::grader::Grader;
use crate::providers::{gemini::GeminiProvider, LlmProvider};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub grader: Arc<Grader>,
}

impl AppState {
    /// State backed by the Gemini provider described in `config`.
    pub fn new(config: AppConfig) -> Self {
        let provider = GeminiProvider::new(Client::new(), config.gemini.clone());
        Self::with_provider(config, Arc::new(provider))
    }

    pub fn with_provider(config: AppConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            config: Arc::new(config),
            grader: Arc::new(Grader::new(EvaluationClient::new(provider))),
        }
    }
}
