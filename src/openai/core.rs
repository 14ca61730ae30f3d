use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::CompletionModel;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: Some(content.to_string()),
        }
    }
}

/// Works with any OpenAI compatible API, including local LLM hosts.
pub async fn completion(
    messages: &Vec<Message>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

// Chat models like to wrap JSON in a markdown fence even when told
// not to
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[derive(Clone, Debug)]
pub struct OpenAiModel {
    api_hostname: String,
    api_key: String,
    model: String,
}

impl OpenAiModel {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    async fn complete_json(&self, prompt: &str) -> Result<String, Error> {
        let messages = vec![
            Message::new(
                Role::System,
                "You only ever respond with raw JSON. No prose, markdown, or code fences.",
            ),
            Message::new(Role::User, prompt),
        ];
        let resp = completion(&messages, &self.api_hostname, &self.api_key, &self.model).await?;
        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))?;

        Ok(strip_code_fence(content).to_string())
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
