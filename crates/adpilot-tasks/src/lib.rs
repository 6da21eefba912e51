mod advisor;
mod allocation;
mod assistant;
mod audit;
mod benchmarks;
mod draft;
mod forecast;
mod optimize;
mod prompts;
mod quality;

#[cfg(test)]
mod testing;

pub use advisor::CampaignAdvisor;
pub use allocation::allocation_fallback;
pub use assistant::{CHAT_FALLBACK, STRUCTURE_FALLBACK};
pub use audit::{audit_fallback, MAX_AUDITED_CAMPAIGNS};
pub use benchmarks::Benchmark;
pub use draft::{draft_fallback, keywords_fallback};
pub use forecast::{forecast_fallback, ForecastRequest, MAX_FORECAST_DAYS, MIN_FORECAST_DAYS};
pub use optimize::{budget_fallback, creative_fallback, targeting_fallback};
pub use prompts::CHAT_SYSTEM_PROMPT;
pub use quality::{quality_score, ObjectiveKind};

#[cfg(test)]
mod tests {
    use adpilot_core::{CampaignStatus, CampaignSummary, PlatformId, Structured};
    use chrono::NaiveDate;
    use serde::Serialize;

    use crate::testing::failing_advisor;

    use super::*;

    fn assert_conforms<T: Structured + Serialize>(task: &str, result: &T) {
        let value = serde_json::to_value(result).unwrap();
        let violations = T::schema().violations(&value);
        assert!(violations.is_empty(), "{task}: {violations:?}");
    }

    fn campaigns() -> Vec<CampaignSummary> {
        ["A", "B", "C"]
            .iter()
            .map(|id| CampaignSummary {
                id: id.to_string(),
                name: format!("Campaign {id}"),
                platform: PlatformId::Tiktok,
                objective: "Sales".into(),
                status: CampaignStatus::Active,
                budget: 2_000_000.0,
                spent: 900_000.0,
                impressions: 40_000,
                clicks: 400,
                ctr: 1.0,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_every_fallback_matches_its_schema() {
        let (advisor, _) = failing_advisor();
        let campaigns = campaigns();
        let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let forecast_request = ForecastRequest::new(
            9_000_000.0,
            vec![PlatformId::Facebook, PlatformId::Zalo],
            "ceramic mugs",
            "Sales",
            start,
        );

        let draft = advisor
            .generate_campaign_draft("ceramic mugs", PlatformId::Google)
            .await;
        assert_conforms("draft", &draft);
        assert_eq!(draft, draft_fallback());

        assert_conforms("keywords", &advisor.suggest_keywords("ceramic mugs").await);
        assert_conforms(
            "targeting_alternatives",
            &advisor
                .generate_targeting_alternatives("ceramic mugs", PlatformId::Facebook)
                .await,
        );
        assert_conforms("targeting", &advisor.optimize_targeting("Women 25-34").await);
        assert_conforms(
            "budget",
            &advisor
                .optimize_budget(5_000_000.0, None, PlatformId::Facebook, "Sales")
                .await,
        );
        assert_conforms(
            "allocation",
            &advisor
                .allocate_budgets(6_000_000.0, &campaigns, "Maximize Conversions")
                .await,
        );
        assert_conforms("creative", &advisor.optimize_creative("Mugs", "Handmade").await);
        assert_conforms("audit", &advisor.audit_campaigns(&campaigns).await);
        assert_conforms(
            "forecast",
            &advisor.generate_performance_forecast(&forecast_request).await,
        );
    }

    #[test]
    fn test_public_fallbacks_match_their_schemas() {
        let campaigns = campaigns();
        let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        assert_conforms("draft", &draft_fallback());
        assert_conforms("keywords", &keywords_fallback());
        assert_conforms("targeting", &targeting_fallback(""));
        assert_conforms("budget", &budget_fallback(f64::NAN));
        assert_conforms("allocation", &allocation_fallback(1_000.0, &campaigns));
        assert_conforms("allocation_empty", &allocation_fallback(1_000.0, &[]));
        assert_conforms("creative", &creative_fallback("", ""));
        assert_conforms("audit", &audit_fallback());
        assert_conforms(
            "forecast",
            &forecast_fallback(&ForecastRequest::new(0.0, vec![], "", "", start)),
        );
    }
}
