use adpilot_core::{AdPilotError, Backend, GenerateRequest, LlmConfig, MessageRole};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

fn llm_err(e: impl ToString) -> AdPilotError {
    AdPilotError::LlmError(e.to_string())
}

fn extract_content(response: CreateChatCompletionResponse) -> Result<String, AdPilotError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AdPilotError::EmptyResponse)
}

/// Chat-completions backend for OpenAI or any endpoint speaking its protocol.
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAiBackend {
    pub fn new(config: &LlmConfig) -> Self {
        let mut openai = OpenAIConfig::new().with_api_key(config.api_key.clone().unwrap_or_default());
        if let Some(base) = &config.api_base {
            openai = openai.with_api_base(base);
        }

        Self {
            client: Client::with_config(openai),
            config: config.clone(),
        }
    }

    fn build_request(&self, request: &GenerateRequest) -> Result<CreateChatCompletionRequest, AdPilotError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system) = &request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.as_str())
                    .build()
                    .map_err(llm_err)?,
            ));
        }

        for msg in &request.history {
            let chat_msg = match msg.role {
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(msg.content.clone())
                        .build()
                        .map_err(llm_err)?,
                ),
                MessageRole::Model => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(msg.content.clone())
                        .build()
                        .map_err(llm_err)?,
                ),
            };
            messages.push(chat_msg);
        }

        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.clone())
                .build()
                .map_err(llm_err)?,
        ));

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.config.model(request.tier)).messages(messages);

        if let Some(schema) = &request.schema {
            args.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: "structured_result".to_string(),
                    schema: Some(schema.to_json_schema()),
                    strict: Some(false),
                },
            });
        }

        args.build().map_err(llm_err)
    }
}

#[async_trait]
impl Backend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AdPilotError> {
        if !self.config.has_credential() && self.config.api_base.is_none() {
            return Err(AdPilotError::MissingCredential);
        }

        let chat_request = self.build_request(request)?;
        let response = self.client.chat().create(chat_request).await.map_err(llm_err)?;
        let content = extract_content(response)?;

        debug!("OpenAI-compatible response: {}", content);
        Ok(content)
    }
}
