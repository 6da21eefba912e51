use adpilot_core::{AuditReport, CampaignSummary, ModelTier, Structured};
use tracing::warn;

use crate::advisor::CampaignAdvisor;
use crate::prompts;

/// Upper bound on campaigns embedded in one audit prompt.
pub const MAX_AUDITED_CAMPAIGNS: usize = 50;

pub const NEUTRAL_AUDIT_SCORE: f64 = 50.0;

pub fn audit_fallback() -> AuditReport {
    AuditReport {
        overall_score: NEUTRAL_AUDIT_SCORE,
        summary: "Automated audit is unavailable right now. Showing general guidance.".to_string(),
        recommendations: vec![
            "Pause ads with a CTR well below the platform average.".to_string(),
            "Move budget toward campaigns with the lowest cost per conversion.".to_string(),
            "Refresh creatives that have been running for more than four weeks.".to_string(),
        ],
        metric_breakdown: None,
    }
}

impl CampaignAdvisor {
    pub async fn audit_campaigns(&self, campaigns: &[CampaignSummary]) -> AuditReport {
        const TASK: &str = "audit";
        if campaigns.is_empty() {
            warn!("{}: nothing to audit, skipping backend call", TASK);
            return audit_fallback();
        }

        if campaigns.len() > MAX_AUDITED_CAMPAIGNS {
            warn!(
                "{}: auditing the first {} of {} campaigns",
                TASK,
                MAX_AUDITED_CAMPAIGNS,
                campaigns.len()
            );
        }
        let snapshot = &campaigns[..campaigns.len().min(MAX_AUDITED_CAMPAIGNS)];

        let prompt = prompts::audit_prompt(snapshot, &AuditReport::schema());
        self.client
            .structured(TASK, ModelTier::Pro, prompt, audit_fallback)
            .await
            .into_value()
    }
}
