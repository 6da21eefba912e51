use adpilot_core::{Allocation, BudgetAllocation, CampaignSummary, ModelTier, Structured};
use tracing::{info, warn};

use crate::advisor::{sanitize_amount, CampaignAdvisor};
use crate::prompts;

/// Even split of the total across every campaign. Sums to `total_budget`.
pub fn allocation_fallback(total_budget: f64, campaigns: &[CampaignSummary]) -> BudgetAllocation {
    if campaigns.is_empty() {
        return BudgetAllocation {
            allocations: Vec::new(),
        };
    }

    let share = sanitize_amount(total_budget) / campaigns.len() as f64;
    BudgetAllocation {
        allocations: campaigns
            .iter()
            .map(|c| Allocation {
                campaign_id: c.id.clone(),
                suggested_budget: share,
                reason: "Default allocation".to_string(),
            })
            .collect(),
    }
}

impl CampaignAdvisor {
    /// Splits `total_budget` across `campaigns`. The backend is asked to make
    /// the allocations sum to the total; a generated result is returned as-is
    /// and is not re-normalized here.
    pub async fn allocate_budgets(
        &self,
        total_budget: f64,
        campaigns: &[CampaignSummary],
        goal: &str,
    ) -> BudgetAllocation {
        const TASK: &str = "allocate_budgets";
        let total = sanitize_amount(total_budget);

        if campaigns.is_empty() {
            warn!("{}: no campaigns selected, skipping backend call", TASK);
            return allocation_fallback(total, campaigns);
        }

        info!("{}: allocating {:.0} across {} campaigns", TASK, total, campaigns.len());
        let prompt = prompts::allocation_prompt(total, campaigns, goal, &BudgetAllocation::schema());
        let outcome = self
            .client
            .structured(TASK, ModelTier::Pro, prompt, || allocation_fallback(total, campaigns))
            .await;

        let allocated = outcome.value().total_budget();
        if !outcome.is_fallback() && (allocated - total).abs() > 1.0 {
            warn!(
                "{}: generated allocations sum to {:.0}, requested {:.0}",
                TASK, allocated, total
            );
        }

        outcome.into_value()
    }
}
