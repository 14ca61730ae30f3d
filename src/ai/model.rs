use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::core::{AppConfig, LlmProvider};
use crate::gemini::GeminiModel;
use crate::openai::OpenAiModel;

/// A hosted model that answers a single prompt with JSON text.
#[async_trait]
pub trait CompletionModel {
    /// Returns the raw reply text. Callers are responsible for parsing it.
    async fn complete_json(&self, prompt: &str) -> Result<String, Error>;
    fn model_name(&self) -> String;
}

pub type BoxedCompletionModel = Box<dyn CompletionModel + Send + Sync + 'static>;

pub fn model_from_config(config: &AppConfig) -> BoxedCompletionModel {
    let AppConfig {
        llm_provider,
        llm_api_hostname,
        llm_api_key,
        llm_model,
        ..
    } = config;

    match llm_provider {
        LlmProvider::Gemini => Box::new(GeminiModel::new(llm_api_hostname, llm_api_key, llm_model)),
        LlmProvider::OpenAi => Box::new(OpenAiModel::new(llm_api_hostname, llm_api_key, llm_model)),
    }
}
