// src/providers/mod.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;

pub mod gemini;

/// A model backend able to produce schema-constrained JSON.
///
/// Object safe so the application state can hold any backend (including the
/// in-process fakes used by tests) behind an `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `prompt` and asks for output conforming to `schema`.
    ///
    /// # Returns
    /// The raw response text and the call latency in milliseconds.
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<(String, u64)>;
}
