use std::sync::Arc;

use adpilot_core::{
    AuditReport, BudgetAllocation, BudgetSuggestion, CampaignDraft, CreativeSuggestion, Forecast,
    Keywords, TargetingAlternatives, TargetingSuggestion,
};
use axum::{extract::State, Json};
use chrono::Utc;

use crate::dto::{
    AllocationRequest, BudgetRequest, CampaignsRequest, ChatRequest, ChatResponse,
    CreativeRequest, DraftRequest, ForecastBody, KeywordsRequest, StructureRequest,
    StructureResponse, TargetingRequest,
};
use crate::error::{validate_amount, AppError};
use crate::state::AppState;

pub async fn draft(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DraftRequest>,
) -> Json<CampaignDraft> {
    Json(
        state
            .advisor
            .generate_campaign_draft(&req.description, req.platform)
            .await,
    )
}

pub async fn keywords(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeywordsRequest>,
) -> Json<Keywords> {
    Json(state.advisor.suggest_keywords(&req.description).await)
}

pub async fn targeting_alternatives(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DraftRequest>,
) -> Json<TargetingAlternatives> {
    Json(
        state
            .advisor
            .generate_targeting_alternatives(&req.description, req.platform)
            .await,
    )
}

pub async fn targeting(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TargetingRequest>,
) -> Json<TargetingSuggestion> {
    Json(state.advisor.optimize_targeting(&req.targeting).await)
}

pub async fn budget(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> Result<Json<BudgetSuggestion>, AppError> {
    let budget = validate_amount("budget", req.budget)?;
    let suggestion = state
        .advisor
        .optimize_budget(
            budget,
            req.bidding_strategy.as_deref(),
            req.platform,
            &req.objective,
        )
        .await;
    Ok(Json(suggestion))
}

pub async fn allocation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AllocationRequest>,
) -> Result<Json<BudgetAllocation>, AppError> {
    let total = validate_amount("totalBudget", req.total_budget)?;
    let allocation = state
        .advisor
        .allocate_budgets(total, &req.campaigns, &req.goal)
        .await;
    Ok(Json(allocation))
}

pub async fn creative(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreativeRequest>,
) -> Json<CreativeSuggestion> {
    Json(
        state
            .advisor
            .optimize_creative(&req.headline, &req.content)
            .await,
    )
}

pub async fn structure(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StructureRequest>,
) -> Json<StructureResponse> {
    let suggestion = state.advisor.suggest_campaign_structure(req.goal).await;
    Json(StructureResponse { suggestion })
}

pub async fn audit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CampaignsRequest>,
) -> Json<AuditReport> {
    Json(state.advisor.audit_campaigns(&req.campaigns).await)
}

pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ForecastBody>,
) -> Result<Json<Forecast>, AppError> {
    validate_amount("totalBudget", body.total_budget)?;
    let request = body.into_request(Utc::now().date_naive());
    Ok(Json(state.advisor.generate_performance_forecast(&request).await))
}

/// Stateless chat: the client sends its own transcript with every turn.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = state.advisor.chat(&req.message, &req.history).await;
    Json(ChatResponse { reply })
}
