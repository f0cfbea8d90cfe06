//! AI text service: narratives, recommendations and emotion keywords
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (Groq by
//! default) over a blocking HTTP client.

use crate::error::{DiaryError, Result};
use crate::infrastructure::config::AiConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const STORY_SYSTEM_PROMPT: &str = "Eres un escritor experto en diarios de viaje.";
const GUIDE_SYSTEM_PROMPT: &str = "Eres un guía turístico experto.";
const EMOTION_SYSTEM_PROMPT: &str =
    "Clasificas emociones. Respondes con una sola palabra en español, sin puntuación.";

/// Text generation consumed by the diary
pub trait StoryTeller {
    /// Short narrative of a trip from its place and notes
    fn generate_story(&self, location: &str, notes: &str) -> Result<String>;

    /// Activities and tips for a destination
    fn recommendations(&self, destination: &str) -> Result<String>;

    /// One-word emotion label for free text, if the service produced one
    fn classify_emotion(&self, text: &str) -> Result<Option<String>>;
}

/// Chat-completion client
pub struct ChatClient {
    api_key: Option<String>,
    endpoint: String,
    model: String,
    temperature: f64,
    client: reqwest::blocking::Client,
}

impl ChatClient {
    /// Build a client from config; the API key is read from the configured env var
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DiaryError::Service(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ChatClient {
            api_key,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            client,
        })
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn request(&self, system: &str, user: String) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| DiaryError::Service("API key not configured".to_string()))?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| DiaryError::Service(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(DiaryError::Service(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let response: ChatCompletionResponse = response
            .json()
            .map_err(|e| DiaryError::Service(format!("Unreadable response: {}", e)))?;

        first_choice(response)
    }
}

impl StoryTeller for ChatClient {
    fn generate_story(&self, location: &str, notes: &str) -> Result<String> {
        self.request(STORY_SYSTEM_PROMPT, story_prompt(location, notes))
    }

    fn recommendations(&self, destination: &str) -> Result<String> {
        self.request(GUIDE_SYSTEM_PROMPT, recommendations_prompt(destination))
    }

    fn classify_emotion(&self, text: &str) -> Result<Option<String>> {
        let reply = self.request(EMOTION_SYSTEM_PROMPT, emotion_prompt(text))?;
        Ok(normalize_keyword(&reply))
    }
}

fn story_prompt(location: &str, notes: &str) -> String {
    format!(
        "Escribe un relato breve, cálido y bonito sobre un viaje a {}. Estas fueron mis notas: {}",
        location, notes
    )
}

fn recommendations_prompt(destination: &str) -> String {
    format!(
        "Dame recomendaciones de viaje para visitar {}. Incluye 3 actividades y consejos.",
        destination
    )
}

fn emotion_prompt(text: &str) -> String {
    format!(
        "¿Qué emoción describe mejor este texto? Responde con una sola palabra.\n\n{}",
        text
    )
}

fn first_choice(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| DiaryError::Service("No choices in response".to_string()))
}

/// Reduce a model reply to one capitalized word, e.g. "  calma." -> "Calma"
pub fn normalize_keyword(reply: &str) -> Option<String> {
    let word = reply
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_inputs() {
        let story = story_prompt("Kyoto", "Saw cherry blossoms");
        assert!(story.contains("viaje a Kyoto"));
        assert!(story.contains("Saw cherry blossoms"));

        let recs = recommendations_prompt("Tokio");
        assert!(recs.contains("visitar Tokio"));
        assert!(recs.contains("3 actividades"));
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  calma.").as_deref(), Some("Calma"));
        assert_eq!(normalize_keyword("ALEGRÍA").as_deref(), Some("Alegría"));
        assert_eq!(
            normalize_keyword("Nostalgia, porque...").as_deref(),
            Some("Nostalgia")
        );
        assert_eq!(normalize_keyword(""), None);
        assert_eq!(normalize_keyword(" ... "), None);
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Hola"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_choice(response).unwrap(), "Hola");
    }

    #[test]
    fn test_empty_choices_is_error() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            first_choice(response),
            Err(DiaryError::Service(_))
        ));
    }

    #[test]
    fn test_missing_key_fails_without_network() {
        let config = AiConfig {
            api_key_env: "TRAVEL_DIARY_TEST_UNSET_KEY".to_string(),
            ..AiConfig::default()
        };
        let client = ChatClient::from_config(&config).unwrap();

        match client.recommendations("Tokio") {
            Err(DiaryError::Service(msg)) => assert!(msg.contains("API key")),
            other => panic!("Expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_endpoint_is_service_error() {
        let config = AiConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..AiConfig::default()
        };
        let client = ChatClient::from_config(&config)
            .unwrap()
            .with_api_key("test-key");

        assert!(matches!(
            client.generate_story("Kyoto", "notes"),
            Err(DiaryError::Service(_))
        ));
    }
}
