// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use log::{info, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const SYSTEM_PROMPT: &str = "You are a creative and helpful marketing assistant.";
const USER_PROMPT_PREFIX: &str = "You are a content marketing expert. Given the following idea, \
generate 3 attention-grabbing headlines for a blog article and a short description (2-3 lines) \
for a social media post.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("no API key found; set {env} in the environment or in a .env file")]
    MissingApiKey { env: String },
    #[error("cannot reach {base_url}: {source}")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("decode chat response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("chat response contained no choices")]
    NoChoices,
    #[error("model returned an empty reply")]
    EmptyReply,
    #[error("build chat request: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    extra_context: Option<String>,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Client {
    /// Without a timeout the HTTP library default applies.
    pub fn new(base_url: &str, model: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("llm.base_url must not be empty");
        }
        let parsed =
            Url::parse(&base_url).with_context(|| format!("llm.base_url {base_url:?} is not a URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "llm.base_url {base_url:?} uses scheme {:?}; expected http or https",
                parsed.scheme()
            );
        }
        if model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }

        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            base_url,
            model: model.trim().to_owned(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_owned(),
            extra_context: None,
            timeout,
            http,
        })
    }

    /// `source` names the variable the key came from, for error messages.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>, source: &str) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        self.api_key_env = source.to_owned();
        self
    }

    #[must_use]
    pub fn with_extra_context(mut self, extra_context: Option<String>) -> Self {
        self.extra_context = extra_context.filter(|context| !context.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    /// Asks the model for headlines and a social post about one idea.
    pub fn enrich(&self, idea_text: &str) -> Result<String, EnrichmentError> {
        let messages = build_enrichment_messages(idea_text, self.extra_context.as_deref());
        info!(
            "event=enrich status=start model={} chars={}",
            self.model,
            idea_text.chars().count()
        );
        let result = self.chat_complete(&messages);
        match &result {
            Ok(reply) => info!(
                "event=enrich status=ok model={} reply_chars={}",
                self.model,
                reply.chars().count()
            ),
            Err(error) => warn!("event=enrich status=error model={} error={error}", self.model),
        }
        result
    }

    pub fn chat_complete(&self, messages: &[Message]) -> Result<String, EnrichmentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EnrichmentError::MissingApiKey {
                env: self.api_key_env.clone(),
            })?;

        let request = ChatRequest::new(&self.model, messages);
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: ChatCompletionResponse =
            response.json().map_err(EnrichmentError::Decode)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(EnrichmentError::NoChoices)?;
        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(EnrichmentError::EmptyReply)
    }
}

/// Reads an API key from the environment, treating blank values as absent.
pub fn api_key_from_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub fn build_enrichment_prompt(idea_text: &str) -> String {
    format!("{USER_PROMPT_PREFIX} IDEA: '{idea_text}'")
}

pub fn build_enrichment_messages(idea_text: &str, extra_context: Option<&str>) -> [Message; 2] {
    let mut system = SYSTEM_PROMPT.to_owned();
    if let Some(context) = extra_context
        && !context.trim().is_empty()
    {
        system.push_str("\n\n## Additional context\n\n");
        system.push_str(context.trim());
    }

    [
        Message {
            role: Role::System,
            content: system,
        },
        Message {
            role: Role::User,
            content: build_enrichment_prompt(idea_text),
        },
    ]
}

fn connection_error(base_url: &str, error: reqwest::Error) -> EnrichmentError {
    if error.is_builder() {
        return EnrichmentError::Client(error);
    }
    EnrichmentError::Connection {
        base_url: base_url.to_owned(),
        source: error,
    }
}

fn clean_error_response(status: StatusCode, body: &str) -> EnrichmentError {
    let status = status.as_u16();
    if let Ok(parsed) = serde_json::from_str::<OpenAIErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.message.is_empty()
    {
        return EnrichmentError::Server {
            status,
            message: error.message,
        };
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return EnrichmentError::Server {
            status,
            message: trimmed.to_owned(),
        };
    }

    EnrichmentError::Server {
        status,
        message: "no details in response body".to_owned(),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorEnvelope {
    error: Option<OpenAIErrorBody>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
}
