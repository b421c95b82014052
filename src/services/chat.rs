use crate::config::LlmConfig;
use crate::constants::LLM_REQUEST_TIMEOUT_SECONDS;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const HEALTH_INSTRUCTIONS: &str = "\
You are Health-Buddy, a friendly health assistant.
Answer only health-related questions, briefly and in plain language.
Prefer evidence-based information and avoid medical jargon where you can.
Suggest seeing a healthcare professional when a concern sounds serious.
Say so honestly when you do not know an answer.
Point users who raise mental health topics to the MindBuddy counselor.
Never format answers as tables; use paragraphs or lists instead.";

const COUNSELOR_INSTRUCTIONS: &str = "\
You are MindBuddy, a warm and non-judgmental mental health counselor.
Listen actively, validate feelings, and offer practical coping strategies.
Use simple, conversational language and ask gentle follow-up questions.
If someone mentions self-harm, suicidal thoughts, or severe distress, urge them
to contact a crisis line or emergency services right away, and never describe
methods of self-harm.
You are not a medical professional; mention that professional therapy can help
with ongoing concerns.
Never format answers as tables; use paragraphs or lists instead.";

/// Assistant persona a chat message is relayed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Health,
    Counselor,
}

impl Persona {
    pub fn instructions(&self) -> &'static str {
        match self {
            Persona::Health => HEALTH_INSTRUCTIONS,
            Persona::Counselor => COUNSELOR_INSTRUCTIONS,
        }
    }
}

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    config: LlmConfig,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Self {
        ChatClient {
            client: Client::new(),
            config,
        }
    }

    /// Send `message` under `persona` and return the first choice's text.
    pub async fn relay(&self, persona: Persona, message: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| {
                AppError::Configuration("LLM API key is not configured".to_string())
            })?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: persona.instructions(),
                },
                Message {
                    role: "user",
                    content: message,
                },
            ],
        };

        tracing::debug!(
            persona = ?persona,
            model = %self.config.model,
            "Relaying {} chars to chat model {}",
            message.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(Duration::from_secs(LLM_REQUEST_TIMEOUT_SECONDS))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| AppError::Upstream("No choices in completion response".to_string()))
    }
}

// Chat-completions wire types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
