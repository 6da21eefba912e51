//! Structured Result types, one per task, each paired with its output schema.
//!
//! Field names are camelCase on the wire to match what the dashboard consumes.

use serde::{Deserialize, Serialize};

use crate::schema::{Field, Schema, Structured};
use crate::types::PlatformId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub ad_headline: String,
    pub ad_content: String,
    /// Responsive search headlines, Google only.
    #[serde(default)]
    pub headlines: Vec<String>,
    /// Responsive search descriptions, Google only.
    #[serde(default)]
    pub descriptions: Vec<String>,
    pub target_interests: String,
    pub target_age: String,
}

impl Structured for CampaignDraft {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("adHeadline", Schema::String),
            Field::required("adContent", Schema::String),
            Field::optional("headlines", Schema::string_list()),
            Field::optional("descriptions", Schema::string_list()),
            Field::required("targetInterests", Schema::String),
            Field::required("targetAge", Schema::String),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keywords(pub Vec<String>);

impl Structured for Keywords {
    fn schema() -> Schema {
        Schema::string_list()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetingAlternatives(pub Vec<String>);

impl Structured for TargetingAlternatives {
    fn schema() -> Schema {
        Schema::string_list()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingSuggestion {
    pub suggested_targeting: String,
    pub reason: String,
}

impl Structured for TargetingSuggestion {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("suggestedTargeting", Schema::String),
            Field::required("reason", Schema::String),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSuggestion {
    pub suggested_budget: f64,
    pub suggested_bidding: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_bid_limit: Option<f64>,
    #[serde(default)]
    pub bid_adjustments: Vec<String>,
}

impl Structured for BudgetSuggestion {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("suggestedBudget", Schema::Number),
            Field::required("suggestedBidding", Schema::String),
            Field::required("reason", Schema::String),
            Field::optional("recommendedBidLimit", Schema::Number),
            Field::optional("bidAdjustments", Schema::string_list()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub campaign_id: String,
    pub suggested_budget: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub allocations: Vec<Allocation>,
}

impl BudgetAllocation {
    pub fn total_budget(&self) -> f64 {
        self.allocations.iter().map(|a| a.suggested_budget).sum()
    }
}

impl Structured for BudgetAllocation {
    fn schema() -> Schema {
        Schema::object(vec![Field::required(
            "allocations",
            Schema::array(Schema::object(vec![
                Field::required("campaignId", Schema::String),
                Field::required("suggestedBudget", Schema::Number),
                Field::required("reason", Schema::String),
            ])),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSuggestion {
    pub headline: String,
    pub content: String,
    pub reason: String,
}

impl Structured for CreativeSuggestion {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("headline", Schema::String),
            Field::required("content", Schema::String),
            Field::required("reason", Schema::String),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInsight {
    pub score: f64,
    pub insight: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    #[serde(rename = "CTR", default, skip_serializing_if = "Option::is_none")]
    pub ctr: Option<MetricInsight>,
    #[serde(rename = "CPC", default, skip_serializing_if = "Option::is_none")]
    pub cpc: Option<MetricInsight>,
    #[serde(rename = "Conversion", default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<MetricInsight>,
    #[serde(rename = "Revenue", default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<MetricInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub overall_score: f64,
    pub summary: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_breakdown: Option<MetricBreakdown>,
}

fn metric_insight_schema() -> Schema {
    Schema::object(vec![
        Field::required("score", Schema::Number),
        Field::required("insight", Schema::String),
        Field::optional("recommendations", Schema::string_list()),
    ])
}

impl Structured for AuditReport {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("overallScore", Schema::Number),
            Field::required("summary", Schema::String),
            Field::required("recommendations", Schema::string_list()),
            Field::optional(
                "metricBreakdown",
                Schema::object(vec![
                    Field::optional("CTR", metric_insight_schema()),
                    Field::optional("CPC", metric_insight_schema()),
                    Field::optional("Conversion", metric_insight_schema()),
                    Field::optional("Revenue", metric_insight_schema()),
                ]),
            ),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub clicks: f64,
    pub impressions: f64,
    pub conversions: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelForecast {
    pub platform: PlatformId,
    pub estimated_reach: f64,
    pub estimated_cpc: f64,
    pub estimated_conversion_rate: f64,
    pub suggested_budget: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub total_reach: f64,
    pub total_conversions: f64,
    pub avg_cpa: f64,
    pub roi_prediction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub daily_data: Vec<DailyForecast>,
    pub channel_breakdown: Vec<ChannelForecast>,
    pub summary: ForecastSummary,
    pub ai_analysis: String,
}

impl Forecast {
    pub fn channel_budget_total(&self) -> f64 {
        self.channel_breakdown.iter().map(|c| c.suggested_budget).sum()
    }
}

impl Structured for Forecast {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required(
                "dailyData",
                Schema::array(Schema::object(vec![
                    Field::required("date", Schema::String),
                    Field::required("clicks", Schema::Number),
                    Field::required("impressions", Schema::Number),
                    Field::required("conversions", Schema::Number),
                    Field::required("cost", Schema::Number),
                ])),
            ),
            Field::required(
                "channelBreakdown",
                Schema::array(Schema::object(vec![
                    Field::required("platform", Schema::String),
                    Field::required("estimatedReach", Schema::Number),
                    Field::required("estimatedCpc", Schema::Number),
                    Field::required("estimatedConversionRate", Schema::Number),
                    Field::required("suggestedBudget", Schema::Number),
                ])),
            ),
            Field::required(
                "summary",
                Schema::object(vec![
                    Field::required("totalReach", Schema::Number),
                    Field::required("totalConversions", Schema::Number),
                    Field::required("avgCpa", Schema::Number),
                    Field::required("roiPrediction", Schema::Number),
                ]),
            ),
            Field::required("aiAnalysis", Schema::String),
        ])
    }
}
