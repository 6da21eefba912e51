use std::sync::Arc;

use adpilot_core::{
    AdPilotError, Backend, GenerateRequest, LlmConfig, Message, ModelTier, Provider, Structured,
};
use tracing::{debug, info, warn};

use crate::parser::parse_response;
use crate::{GeminiBackend, OpenAiBackend};

/// What a single orchestrated call produced. Both arms carry a value of the
/// task's result type, so callers never handle a missing result.
#[derive(Debug)]
pub enum Outcome<T> {
    Generated(T),
    Fallback { value: T, cause: AdPilotError },
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Generated(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Generated(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn cause(&self) -> Option<&AdPilotError> {
        match self {
            Outcome::Generated(_) => None,
            Outcome::Fallback { cause, .. } => Some(cause),
        }
    }
}

/// Owns the request/response lifecycle of one task invocation: a single
/// attempt, no retry, every failure resolved to the caller's fallback.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn Backend>,
    system_prompt: Option<Arc<str>>,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            system_prompt: None,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, AdPilotError> {
        Ok(Self::new(build_backend(config)?))
    }

    /// System instruction sent with every chat turn.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = Some(Arc::from(prompt));
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn structured<T, F>(
        &self,
        task: &str,
        tier: ModelTier,
        prompt: String,
        fallback: F,
    ) -> Outcome<T>
    where
        T: Structured,
        F: FnOnce() -> T,
    {
        let request = GenerateRequest::new(tier, prompt).with_schema(T::schema());

        let raw = match self.backend.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => return Self::fall_back(task, e, fallback),
        };

        match parse_response::<T>(Some(&raw)) {
            Ok(value) => {
                info!("{}: structured result from {}", task, self.backend.name());
                Outcome::Generated(value)
            }
            Err(e) => {
                debug!("{}: unparseable response: {}", task, raw);
                Self::fall_back(task, e, fallback)
            }
        }
    }

    /// Free-form advisory text. An empty reply counts as a failure.
    pub async fn text<F>(&self, task: &str, tier: ModelTier, prompt: String, fallback: F) -> Outcome<String>
    where
        F: FnOnce() -> String,
    {
        let request = GenerateRequest::new(tier, prompt);
        self.free_text(task, request, fallback).await
    }

    /// One chat turn. `history` is copied, never mutated; keeping the
    /// conversation is the caller's job.
    pub async fn chat<F>(&self, history: &[Message], message: &str, fallback: F) -> Outcome<String>
    where
        F: FnOnce() -> String,
    {
        let mut request =
            GenerateRequest::new(ModelTier::Flash, message).with_history(history.to_vec());
        if let Some(system) = &self.system_prompt {
            request = request.with_system(system.as_ref());
        }
        self.free_text("chat", request, fallback).await
    }

    async fn free_text<F>(&self, task: &str, request: GenerateRequest, fallback: F) -> Outcome<String>
    where
        F: FnOnce() -> String,
    {
        match self.backend.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("{}: text result from {}", task, self.backend.name());
                Outcome::Generated(text)
            }
            Ok(_) => Self::fall_back(task, AdPilotError::EmptyResponse, fallback),
            Err(e) => Self::fall_back(task, e, fallback),
        }
    }

    fn fall_back<T>(task: &str, cause: AdPilotError, fallback: impl FnOnce() -> T) -> Outcome<T> {
        warn!("{}: using fallback result ({})", task, cause);
        Outcome::Fallback {
            value: fallback(),
            cause,
        }
    }
}

pub fn build_backend(config: &LlmConfig) -> Result<Arc<dyn Backend>, AdPilotError> {
    if !config.has_credential() {
        warn!("No API credential configured; AI features will return fallback results");
    }

    let backend: Arc<dyn Backend> = match config.provider {
        Provider::Gemini => Arc::new(GeminiBackend::new(config)?),
        Provider::OpenAi => Arc::new(OpenAiBackend::new(config)),
    };
    Ok(backend)
}
