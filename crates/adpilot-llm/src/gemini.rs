use std::time::Duration;

use adpilot_core::{AdPilotError, Backend, GenerateRequest, LlmConfig, MessageRole};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

/// Native Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: Client,
    api_base: String,
    config: LlmConfig,
}

impl GeminiBackend {
    pub fn new(config: &LlmConfig) -> Result<Self, AdPilotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdPilotError::Config(e.to_string()))?;

        let api_base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            api_base,
            config: config.clone(),
        })
    }

    fn endpoint(&self, request: &GenerateRequest) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base,
            urlencoding::encode(self.config.model(request.tier))
        )
    }

    fn build_body(request: &GenerateRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Model => "model",
                };
                GeminiContent::text(Some(role), &msg.content)
            })
            .collect();
        contents.push(GeminiContent::text(Some("user"), &request.prompt));

        GeminiRequest {
            system_instruction: request
                .system
                .as_deref()
                .map(|s| GeminiContent::text(None, s)),
            contents,
            generation_config: request.schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.to_gemini(),
            }),
        }
    }

    fn extract_text(response: GeminiResponse) -> Result<String, AdPilotError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AdPilotError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AdPilotError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(AdPilotError::MissingCredential);
        };

        let url = self.endpoint(request);
        debug!("Gemini request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| AdPilotError::LlmError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdPilotError::LlmError(format!(
                "Gemini error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let data: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AdPilotError::LlmError(e.to_string()))?;

        Self::extract_text(data)
    }
}
