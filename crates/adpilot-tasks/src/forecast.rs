use adpilot_core::{
    ChannelForecast, DailyForecast, Forecast, ForecastSummary, ModelTier, PlatformId, Structured,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::advisor::{sanitize_amount, CampaignAdvisor};
use crate::benchmarks::Benchmark;
use crate::prompts;

pub const MIN_FORECAST_DAYS: u32 = 7;
pub const MAX_FORECAST_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub total_budget: f64,
    pub platforms: Vec<PlatformId>,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default = "default_days")]
    pub days: u32,
    pub start_date: NaiveDate,
}

fn default_days() -> u32 {
    MAX_FORECAST_DAYS
}

impl ForecastRequest {
    pub fn new(
        total_budget: f64,
        platforms: Vec<PlatformId>,
        keywords: impl Into<String>,
        objective: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            total_budget,
            platforms,
            keywords: keywords.into(),
            objective: objective.into(),
            days: default_days(),
            start_date,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Requested horizon clamped to what the dashboard can chart.
    pub fn days(&self) -> u32 {
        self.days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS)
    }
}

/// Baseline projection from platform benchmarks: daily spend grows linearly
/// and sums to the total budget, channels get an even share.
pub fn forecast_fallback(request: &ForecastRequest) -> Forecast {
    let total = sanitize_amount(request.total_budget);
    let days = request.days() as u64;
    let blended = Benchmark::blended(&request.platforms);
    let weight_sum = (days * (days + 1) / 2) as f64;

    let daily_data: Vec<DailyForecast> = (1..=days)
        .map(|day| {
            let cost = total * day as f64 / weight_sum;
            let clicks = (cost / blended.cpc).round();
            let impressions = (clicks / (blended.ctr / 100.0)).round();
            let conversions = (clicks * blended.conversion_rate / 100.0).round();
            let date = request
                .start_date
                .checked_add_days(Days::new(day - 1))
                .unwrap_or(request.start_date);

            DailyForecast {
                date: date.format("%Y-%m-%d").to_string(),
                clicks,
                impressions,
                conversions,
                cost,
            }
        })
        .collect();

    let channel_budget = if request.platforms.is_empty() {
        0.0
    } else {
        total / request.platforms.len() as f64
    };
    let channel_breakdown = request
        .platforms
        .iter()
        .map(|platform| {
            let bench = Benchmark::for_platform(*platform);
            ChannelForecast {
                platform: *platform,
                estimated_reach: (channel_budget / bench.cpc / (bench.ctr / 100.0)).round(),
                estimated_cpc: bench.cpc,
                estimated_conversion_rate: bench.conversion_rate,
                suggested_budget: channel_budget,
            }
        })
        .collect();

    let total_reach: f64 = daily_data.iter().map(|d| d.impressions).sum();
    let total_conversions: f64 = daily_data.iter().map(|d| d.conversions).sum();
    let avg_cpa = if total_conversions > 0.0 {
        (total / total_conversions).round()
    } else {
        0.0
    };

    Forecast {
        daily_data,
        channel_breakdown,
        summary: ForecastSummary {
            total_reach,
            total_conversions,
            avg_cpa,
            roi_prediction: 0.0,
        },
        ai_analysis: "AI forecast is unavailable; showing a baseline projection from platform benchmarks."
            .to_string(),
    }
}

impl CampaignAdvisor {
    /// Channel budgets in a generated forecast are requested, not enforced, to
    /// sum to the total budget.
    pub async fn generate_performance_forecast(&self, request: &ForecastRequest) -> Forecast {
        const TASK: &str = "forecast";
        let request = &ForecastRequest {
            total_budget: sanitize_amount(request.total_budget),
            ..request.clone()
        };
        if request.platforms.is_empty() {
            warn!("{}: no platforms selected, skipping backend call", TASK);
            return forecast_fallback(request);
        }

        let prompt = prompts::forecast_prompt(request, &Forecast::schema());
        let outcome = self
            .client
            .structured(TASK, ModelTier::Pro, prompt, || forecast_fallback(request))
            .await;

        if !outcome.is_fallback() {
            let channels = outcome.value().channel_budget_total();
            if (channels - request.total_budget).abs() > 1.0 {
                warn!(
                    "{}: channel budgets sum to {:.0}, requested {:.0}",
                    TASK, channels, request.total_budget
                );
            }
        }

        outcome.into_value()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::testing::{canned_advisor, failing_advisor};

    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn request(platforms: Vec<PlatformId>) -> ForecastRequest {
        ForecastRequest::new(30_000_000.0, platforms, "running shoes", "Sales", start())
    }

    #[test]
    fn test_days_are_clamped() {
        assert_eq!(request(vec![]).with_days(3).days(), 7);
        assert_eq!(request(vec![]).with_days(90).days(), 30);
        assert_eq!(request(vec![]).with_days(14).days(), 14);
    }

    #[test]
    fn test_fallback_series_increases_and_sums_to_budget() {
        let forecast = forecast_fallback(&request(vec![PlatformId::Facebook, PlatformId::Google]));

        assert_eq!(forecast.daily_data.len(), 30);
        assert_eq!(forecast.daily_data[0].date, "2026-03-01");
        assert_eq!(forecast.daily_data[29].date, "2026-03-30");

        for pair in forecast.daily_data.windows(2) {
            assert!(pair[1].cost > pair[0].cost);
            assert!(pair[1].clicks >= pair[0].clicks);
        }

        let spend: f64 = forecast.daily_data.iter().map(|d| d.cost).sum();
        assert!((spend - 30_000_000.0).abs() < 1e-3);
        assert!((forecast.channel_budget_total() - 30_000_000.0).abs() < 1e-6);
        assert_eq!(forecast.channel_breakdown[1].estimated_cpc, 6_000.0);
    }

    #[test]
    fn test_fallback_with_zero_budget() {
        let mut req = request(vec![PlatformId::Zalo]);
        req.total_budget = 0.0;
        let forecast = forecast_fallback(&req);
        assert!(forecast.daily_data.iter().all(|d| d.cost == 0.0 && d.clicks == 0.0));
        assert_eq!(forecast.summary.avg_cpa, 0.0);
    }

    #[tokio::test]
    async fn test_failure_is_deterministic() {
        let (advisor, backend) = failing_advisor();
        let req = request(vec![PlatformId::Tiktok]).with_days(10);

        let first = advisor.generate_performance_forecast(&req).await;
        let second = advisor.generate_performance_forecast(&req).await;

        assert_eq!(first, second);
        assert_eq!(first.daily_data.len(), 10);
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_no_platforms_skips_backend() {
        let (advisor, backend) = failing_advisor();
        let forecast = advisor.generate_performance_forecast(&request(vec![])).await;
        assert!(forecast.channel_breakdown.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generated_forecast_passes_through() {
        let reply = r#"{
            "dailyData": [
                {"date": "2026-03-01", "clicks": 120, "impressions": 9000, "conversions": 4, "cost": 700000}
            ],
            "channelBreakdown": [
                {"platform": "google", "estimatedReach": 50000, "estimatedCpc": 5800,
                 "estimatedConversionRate": 3.5, "suggestedBudget": 30000000}
            ],
            "summary": {"totalReach": 50000, "totalConversions": 120, "avgCpa": 250000, "roiPrediction": 140},
            "aiAnalysis": "Search intent is strong."
        }"#;
        let (advisor, backend) = canned_advisor(reply);

        let forecast = advisor
            .generate_performance_forecast(&request(vec![PlatformId::Google]))
            .await;

        assert_eq!(forecast.channel_budget_total(), 30_000_000.0);
        assert_eq!(forecast.summary.roi_prediction, 140.0);
        assert_eq!(forecast.ai_analysis, "Search intent is strong.");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].tier, ModelTier::Pro);
        assert!(seen[0].prompt.contains("starting 2026-03-01"));
    }

    #[tokio::test]
    async fn test_invalid_total_is_sanitized_before_prompting() {
        let (advisor, backend) = canned_advisor("not json");
        let mut req = request(vec![PlatformId::Facebook]);
        req.total_budget = f64::NAN;

        let forecast = advisor.generate_performance_forecast(&req).await;
        assert_eq!(forecast.channel_budget_total(), 0.0);

        let seen = backend.seen.lock().unwrap();
        assert!(!seen[0].prompt.contains("NaN"));
    }

    proptest! {
        #[test]
        fn fallback_channels_conserve_budget(total in 0.0f64..1e11, n in 1usize..=4, days in 0u32..60) {
            let platforms = PlatformId::ALL[..n].to_vec();
            let req = ForecastRequest::new(total, platforms, "k", "Sales", start()).with_days(days);
            let forecast = forecast_fallback(&req);

            let tolerance = 1e-6 * total.max(1.0);
            prop_assert!((forecast.channel_budget_total() - total).abs() <= tolerance);
            let spend: f64 = forecast.daily_data.iter().map(|d| d.cost).sum();
            prop_assert!((spend - total).abs() <= tolerance);
            prop_assert!((7..=30).contains(&forecast.daily_data.len()));
        }
    }
}
