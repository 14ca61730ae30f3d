//! Minimal client for the Gemini `generateContent` REST endpoint
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::CompletionModel;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single user turn that asks for a JSON-only reply.
    pub fn json_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some(String::from("user")),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: String::from("application/json"),
            },
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate with all of its parts joined.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

pub async fn generate_content(
    request: &GenerateContentRequest,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<GenerateContentResponse, Error> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        api_hostname.trim_end_matches("/"),
        model
    );
    let response = reqwest::Client::new()
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(request)
        .send()
        .await?
        .error_for_status()?
        .json::<GenerateContentResponse>()
        .await?;

    Ok(response)
}

#[derive(Clone, Debug)]
pub struct GeminiModel {
    api_hostname: String,
    api_key: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionModel for GeminiModel {
    async fn complete_json(&self, prompt: &str) -> Result<String, Error> {
        let request = GenerateContentRequest::json_prompt(prompt);
        let resp =
            generate_content(&request, &self.api_hostname, &self.api_key, &self.model).await?;
        resp.text()
            .ok_or(anyhow!("Gemini returned no text. Resp:\n\n {:?}", resp))
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
