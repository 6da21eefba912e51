use adpilot_tasks::quality_score;
use axum::Json;

use crate::dto::{CampaignsRequest, QualityResponse, QualityScore};

pub async fn quality(Json(req): Json<CampaignsRequest>) -> Json<QualityResponse> {
    let scores = req
        .campaigns
        .iter()
        .map(|c| QualityScore {
            campaign_id: c.id.clone(),
            score: quality_score(c),
        })
        .collect();
    Json(QualityResponse { scores })
}
