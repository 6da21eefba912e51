use adpilot_core::{CampaignSummary, Message, PlatformId, StructureGoal};
use adpilot_tasks::{ForecastRequest, MAX_FORECAST_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub description: String,
    pub platform: PlatformId,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct TargetingRequest {
    pub targeting: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub budget: f64,
    #[serde(default)]
    pub bidding_strategy: Option<String>,
    pub platform: PlatformId,
    #[serde(default)]
    pub objective: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub total_budget: f64,
    pub campaigns: Vec<CampaignSummary>,
    #[serde(default = "default_goal")]
    pub goal: String,
}

fn default_goal() -> String {
    "Maximize Conversions".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreativeRequest {
    pub headline: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    pub goal: StructureGoal,
}

#[derive(Debug, Serialize)]
pub struct StructureResponse {
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
pub struct CampaignsRequest {
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastBody {
    pub total_budget: f64,
    pub platforms: Vec<PlatformId>,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl ForecastBody {
    pub fn into_request(self, today: NaiveDate) -> ForecastRequest {
        ForecastRequest::new(
            self.total_budget,
            self.platforms,
            self.keywords,
            self.objective,
            self.start_date.unwrap_or(today),
        )
        .with_days(self.days.unwrap_or(MAX_FORECAST_DAYS))
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub campaign_id: String,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub scores: Vec<QualityScore>,
}

// === WebSocket DTOs ===

#[derive(Debug, Deserialize)]
pub struct WsPayload {
    pub uuid: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub init: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WsResponse {
    Stream { on_chat_model_stream: String },
    End { on_chat_model_end: bool },
}

impl WsResponse {
    pub fn stream(content: &str) -> Self {
        Self::Stream {
            on_chat_model_stream: content.to_string(),
        }
    }

    pub fn end() -> Self {
        Self::End {
            on_chat_model_end: true,
        }
    }
}
