//! Optional text-flavor provider.
//!
//! A provider supplies human-like names, descriptions, and comments for a
//! minority of string fields. Absence is a normal outcome: every failure
//! path collapses to `None` and the factories fall back to their own
//! deterministic templates, so generation behaves identically without it.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use taskseed_core::FlavorConfig;

pub trait FlavorProvider {
    fn suggest_name(&self, category: &str, context: &str) -> Option<String>;
    fn suggest_description(&self, name: &str) -> Option<String>;
    fn suggest_comment(&self, task_name: &str) -> Option<String>;
}

/// Disabled provider: every suggestion is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlavor;

impl FlavorProvider for NoFlavor {
    fn suggest_name(&self, _category: &str, _context: &str) -> Option<String> {
        None
    }

    fn suggest_description(&self, _name: &str) -> Option<String> {
        None
    }

    fn suggest_comment(&self, _task_name: &str) -> Option<String> {
        None
    }
}

/// Build the provider the configuration selects.
pub fn from_config(config: &FlavorConfig) -> Box<dyn FlavorProvider> {
    match LlmFlavor::from_config(config) {
        Some(flavor) => Box::new(flavor),
        None => Box::new(NoFlavor),
    }
}

/// Network-backed provider speaking the OpenAI-style chat-completion shape.
/// Calls are blocking and time-bounded; any error is absorbed.
pub struct LlmFlavor {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl LlmFlavor {
    /// `None` when disabled, the key variable is unset, or the client
    /// cannot be built; callers fall back to [`NoFlavor`].
    pub fn from_config(config: &FlavorConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let Ok(api_key) = std::env::var(&config.api_key_env) else {
            debug!(var = %config.api_key_env, "flavor api key not set, provider disabled");
            return None;
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn complete(&self, prompt: &str) -> Option<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 150,
            "temperature": 0.7,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status);
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "flavor request failed");
                return None;
            }
        };
        let parsed: ChatResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "flavor response unparseable");
                return None;
            }
        };
        let text = parsed.choices.into_iter().next()?.message.content;
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl FlavorProvider for LlmFlavor {
    fn suggest_name(&self, category: &str, context: &str) -> Option<String> {
        self.complete(&format!(
            "Generate a realistic task name for a {category} project.\n\
             Project context: {context}\n\
             Keep it under 10 words, start with an action verb, and return \
             only the task name."
        ))
    }

    fn suggest_description(&self, name: &str) -> Option<String> {
        self.complete(&format!(
            "Write a brief task description for: {name}\n\
             Two or three sentences, include acceptance criteria, and return \
             only the description."
        ))
    }

    fn suggest_comment(&self, task_name: &str) -> Option<String> {
        self.complete(&format!(
            "Write a short teammate comment on the task: {task_name}\n\
             One or two sentences, professional tone, return only the comment."
        ))
    }
}
