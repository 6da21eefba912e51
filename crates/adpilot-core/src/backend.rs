use async_trait::async_trait;

use crate::{AdPilotError, Message, ModelTier, Schema};

/// One request to a generative backend.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub tier: ModelTier,
    pub system: Option<String>,
    pub prompt: String,
    /// Present for structured tasks; the backend is asked to emit matching JSON.
    pub schema: Option<Schema>,
    /// Prior chat turns, oldest first. Empty for single-shot tasks.
    pub history: Vec<Message>,
}

impl GenerateRequest {
    pub fn new(tier: ModelTier, prompt: impl Into<String>) -> Self {
        Self {
            tier,
            system: None,
            prompt: prompt.into(),
            schema: None,
            history: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the raw reply text. Transport and status failures are errors;
    /// interpreting the text is left to the caller.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AdPilotError>;
}
