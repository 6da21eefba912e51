use adpilot_core::{
    BudgetSuggestion, CreativeSuggestion, ModelTier, PlatformId, Structured, TargetingSuggestion,
};

use crate::advisor::{is_blank, sanitize_amount, CampaignAdvisor};
use crate::prompts;

pub const GENERIC_AUDIENCE_TERMS: &str = "Lookalike 1%, Engaged shoppers";
pub const BUDGET_FALLBACK_FACTOR: f64 = 1.2;
pub const FALLBACK_BIDDING: &str = "Lowest Cost (Auto)";
pub const CREATIVE_FALLBACK_SUFFIX: &str = " (revised)";

pub fn targeting_fallback(current: &str) -> TargetingSuggestion {
    let current = current.trim();
    let suggested_targeting = if current.is_empty() {
        GENERIC_AUDIENCE_TERMS.to_string()
    } else {
        format!("{current}, {GENERIC_AUDIENCE_TERMS}")
    };

    TargetingSuggestion {
        suggested_targeting,
        reason: "Broadened with high-intent audiences that perform well across platforms.".to_string(),
    }
}

pub fn budget_fallback(current_budget: f64) -> BudgetSuggestion {
    BudgetSuggestion {
        suggested_budget: (sanitize_amount(current_budget) * BUDGET_FALLBACK_FACTOR).round(),
        suggested_bidding: FALLBACK_BIDDING.to_string(),
        reason: "Scale the budget by 20% with automatic bidding to collect more delivery data."
            .to_string(),
        recommended_bid_limit: None,
        bid_adjustments: Vec::new(),
    }
}

pub fn creative_fallback(headline: &str, content: &str) -> CreativeSuggestion {
    CreativeSuggestion {
        headline: format!("{headline}{CREATIVE_FALLBACK_SUFFIX}"),
        content: format!("{content}{CREATIVE_FALLBACK_SUFFIX}"),
        reason: "AI suggestions are unavailable; review the copy manually.".to_string(),
    }
}

impl CampaignAdvisor {
    pub async fn optimize_targeting(&self, current: &str) -> TargetingSuggestion {
        const TASK: &str = "optimize_targeting";
        if is_blank(TASK, current) {
            return targeting_fallback(current);
        }

        let prompt = prompts::targeting_prompt(current, &TargetingSuggestion::schema());
        self.client
            .structured(TASK, ModelTier::Flash, prompt, || targeting_fallback(current))
            .await
            .into_value()
    }

    pub async fn optimize_budget(
        &self,
        current_budget: f64,
        bidding: Option<&str>,
        platform: PlatformId,
        objective: &str,
    ) -> BudgetSuggestion {
        const TASK: &str = "optimize_budget";
        let budget = sanitize_amount(current_budget);
        let bidding = bidding.filter(|b| !b.trim().is_empty()).unwrap_or("Auto");

        let prompt = prompts::budget_prompt(
            budget,
            bidding,
            platform,
            objective,
            &BudgetSuggestion::schema(),
        );
        self.client
            .structured(TASK, ModelTier::Flash, prompt, || budget_fallback(budget))
            .await
            .into_value()
    }

    pub async fn optimize_creative(&self, headline: &str, content: &str) -> CreativeSuggestion {
        const TASK: &str = "optimize_creative";
        if headline.trim().is_empty() && is_blank(TASK, content) {
            return creative_fallback(headline, content);
        }

        let prompt = prompts::creative_prompt(headline, content, &CreativeSuggestion::schema());
        self.client
            .structured(TASK, ModelTier::Flash, prompt, || creative_fallback(headline, content))
            .await
            .into_value()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{canned_advisor, failing_advisor};

    use super::*;

    #[tokio::test]
    async fn test_budget_fallback_scales_current_budget() {
        let (advisor, backend) = failing_advisor();
        let suggestion = advisor
            .optimize_budget(5_000_000.0, Some("Auto"), PlatformId::Facebook, "Sales")
            .await;

        assert_eq!(suggestion.suggested_budget, 6_000_000.0);
        assert_eq!(suggestion.suggested_bidding, "Lowest Cost (Auto)");
        assert!(!suggestion.reason.is_empty());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_budget_fallback_is_deterministic() {
        let (advisor, _) = failing_advisor();
        let first = advisor
            .optimize_budget(1_234_567.0, None, PlatformId::Tiktok, "Traffic")
            .await;
        let second = advisor
            .optimize_budget(1_234_567.0, None, PlatformId::Tiktok, "Traffic")
            .await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_zero_and_invalid_budgets() {
        let (advisor, _) = failing_advisor();
        let zero = advisor
            .optimize_budget(0.0, None, PlatformId::Zalo, "Awareness")
            .await;
        assert_eq!(zero.suggested_budget, 0.0);

        let nan = advisor
            .optimize_budget(f64::NAN, None, PlatformId::Zalo, "Awareness")
            .await;
        assert_eq!(nan.suggested_budget, 0.0);
    }

    #[tokio::test]
    async fn test_budget_success_keeps_optional_fields() {
        let reply = r#"{"suggestedBudget": 7000000, "suggestedBidding": "Cost Cap",
            "reason": "Strong ROAS", "recommendedBidLimit": 45000,
            "bidAdjustments": ["+20% mobile"]}"#;
        let (advisor, backend) = canned_advisor(reply);

        let suggestion = advisor
            .optimize_budget(5_000_000.0, Some("Manual CPC"), PlatformId::Google, "Sales")
            .await;

        assert_eq!(suggestion.suggested_budget, 7_000_000.0);
        assert_eq!(suggestion.recommended_bid_limit, Some(45_000.0));
        assert_eq!(suggestion.bid_adjustments, vec!["+20% mobile"]);

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].prompt.contains("Manual CPC"));
        assert!(seen[0].prompt.contains("5000000"));
    }

    #[tokio::test]
    async fn test_targeting_fallback_appends_generic_terms() {
        let (advisor, _) = failing_advisor();
        let suggestion = advisor.optimize_targeting("Women 25-34, yoga").await;
        assert_eq!(
            suggestion.suggested_targeting,
            "Women 25-34, yoga, Lookalike 1%, Engaged shoppers"
        );
    }

    #[tokio::test]
    async fn test_blank_targeting_skips_backend() {
        let (advisor, backend) = failing_advisor();
        let suggestion = advisor.optimize_targeting("  ").await;
        assert_eq!(suggestion.suggested_targeting, GENERIC_AUDIENCE_TERMS);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_creative_fallback_marks_input() {
        let (advisor, _) = failing_advisor();
        let suggestion = advisor.optimize_creative("Summer Sale", "Up to 50% off").await;
        assert_eq!(suggestion.headline, "Summer Sale (revised)");
        assert_eq!(suggestion.content, "Up to 50% off (revised)");
    }

    #[tokio::test]
    async fn test_creative_with_only_headline_still_calls_backend() {
        let (advisor, backend) = failing_advisor();
        advisor.optimize_creative("Summer Sale", "").await;
        assert_eq!(backend.call_count(), 1);
    }
}
