use adpilot_core::{CampaignSummary, PlatformId, Schema, StructureGoal};

use crate::forecast::ForecastRequest;

pub const CHAT_SYSTEM_PROMPT: &str = r#"You are an advertising assistant inside a multi-platform ads dashboard (Facebook, Google, TikTok, Zalo).

Your job is to:
1. Answer questions about campaign setup, budgeting, bidding, targeting and creatives
2. Give concrete, actionable recommendations
3. Keep the conversation context in mind

When responding:
- Be concise and practical
- Prefer numbered steps for procedures
- Say so when a question needs data you don't have"#;

/// Appended to every prompt that expects structured output. Backends do not
/// reliably honour a response schema on their own.
pub fn json_instruction(schema: &Schema) -> String {
    format!(
        "Respond with JSON only, without prose or code fences, matching this JSON Schema:\n{}",
        schema.to_json_schema()
    )
}

fn campaigns_json(campaigns: &[CampaignSummary]) -> String {
    serde_json::to_string(campaigns).unwrap_or_else(|_| "[]".to_string())
}

pub fn draft_prompt(description: &str, platform: PlatformId, schema: &Schema) -> String {
    let format_hint = if platform == PlatformId::Google {
        "Also write 5 responsive search ad headlines (at most 30 characters each) in `headlines` \
         and 2 descriptions (at most 90 characters each) in `descriptions`."
    } else {
        "Write one headline in `adHeadline` and the ad body in `adContent`."
    };

    format!(
        "Write ad copy for \"{description}\" on {}.\n{format_hint}\n\
         Always fill `adHeadline` and `adContent`, and suggest `targetAge` (e.g. \"25-40\") \
         and `targetInterests` (comma separated).\n\n{}",
        platform.label(),
        json_instruction(schema)
    )
}

pub fn keywords_prompt(description: &str, schema: &Schema) -> String {
    format!(
        "Suggest the 15 most effective search keywords for a Google Search campaign \
         promoting \"{description}\".\n\n{}",
        json_instruction(schema)
    )
}

pub fn targeting_alternatives_prompt(description: &str, platform: PlatformId, schema: &Schema) -> String {
    format!(
        "Suggest 3 distinct audience targeting options for \"{description}\" on {}. \
         Each option is one short sentence.\n\n{}",
        platform.label(),
        json_instruction(schema)
    )
}

pub fn targeting_prompt(current: &str, schema: &Schema) -> String {
    format!(
        "Improve this ad targeting: \"{current}\". Return a better targeting description \
         in `suggestedTargeting` and explain the change in `reason`.\n\n{}",
        json_instruction(schema)
    )
}

pub fn budget_prompt(
    budget: f64,
    bidding: &str,
    platform: PlatformId,
    objective: &str,
    schema: &Schema,
) -> String {
    format!(
        "Optimize the daily budget of a {} campaign with objective \"{objective}\".\n\
         Current daily budget: {budget:.0}. Current bidding strategy: {bidding}.\n\
         Suggest a new budget, a bidding strategy and explain why. Add a bid limit and \
         bid adjustments when they help.\n\n{}",
        platform.label(),
        json_instruction(schema)
    )
}

pub fn allocation_prompt(
    total_budget: f64,
    campaigns: &[CampaignSummary],
    goal: &str,
    schema: &Schema,
) -> String {
    format!(
        "You are a marketing director optimizing budget allocation.\n\
         New total budget: {total_budget:.0}. Goal: {goal}.\n\
         Campaign data: {}\n\
         Give every campaign above an allocation using its `id` as `campaignId`. \
         The suggested budgets must add up to exactly {total_budget:.0}.\n\n{}",
        campaigns_json(campaigns),
        json_instruction(schema)
    )
}

pub fn creative_prompt(headline: &str, content: &str, schema: &Schema) -> String {
    format!(
        "Improve this ad creative.\nHeadline: \"{headline}\"\nContent: \"{content}\"\n\
         Return the new `headline`, new `content` and the `reason` for the changes.\n\n{}",
        json_instruction(schema)
    )
}

pub fn structure_prompt(goal: StructureGoal) -> String {
    format!(
        "Suggest an optimal ad campaign structure (campaigns, ad groups, ads, budget split) \
         for the goal: {}. Keep it short and practical.",
        goal.describe()
    )
}

pub fn audit_prompt(campaigns: &[CampaignSummary], schema: &Schema) -> String {
    format!(
        "Audit the following ad campaigns. Give an `overallScore` from 0 to 100, a short \
         `summary` and concrete `recommendations`. Where possible add a `metricBreakdown` \
         for CTR, CPC, Conversion and Revenue, each with a 0-100 score, an insight and \
         recommendations.\nCampaigns: {}\n\n{}",
        campaigns_json(campaigns),
        json_instruction(schema)
    )
}

pub fn forecast_prompt(request: &ForecastRequest, schema: &Schema) -> String {
    let platforms = request
        .platforms
        .iter()
        .map(|p| p.id())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Forecast ad performance for a total budget of {:.0} across {platforms} \
         for keywords/product \"{}\" with objective \"{}\".\n\
         Produce {} daily data points starting {} (dates as YYYY-MM-DD), one \
         `channelBreakdown` entry per platform whose `suggestedBudget` values add up to \
         exactly {:.0}, summary totals and a short `aiAnalysis`.\n\n{}",
        request.total_budget,
        request.keywords,
        request.objective,
        request.days(),
        request.start_date.format("%Y-%m-%d"),
        request.total_budget,
        json_instruction(schema)
    )
}
