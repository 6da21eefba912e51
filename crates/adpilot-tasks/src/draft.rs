use adpilot_core::{CampaignDraft, Keywords, ModelTier, PlatformId, Structured, TargetingAlternatives};
use tracing::info;

use crate::advisor::{is_blank, CampaignAdvisor};
use crate::prompts;

pub const GENERIC_KEYWORDS: [&str; 5] = [
    "buy online",
    "best price",
    "official store",
    "discount deals",
    "free shipping",
];

pub fn draft_fallback() -> CampaignDraft {
    CampaignDraft {
        ad_headline: "Could not generate a headline".to_string(),
        ad_content: "Could not generate ad copy. Please try again later.".to_string(),
        headlines: Vec::new(),
        descriptions: Vec::new(),
        target_interests: "Could not generate interests".to_string(),
        target_age: "18-65".to_string(),
    }
}

pub fn keywords_fallback() -> Keywords {
    Keywords(GENERIC_KEYWORDS.iter().map(|k| k.to_string()).collect())
}

impl CampaignAdvisor {
    pub async fn generate_campaign_draft(&self, description: &str, platform: PlatformId) -> CampaignDraft {
        const TASK: &str = "draft";
        if is_blank(TASK, description) {
            return draft_fallback();
        }

        info!("{}: drafting ad copy for {}", TASK, platform);
        let prompt = prompts::draft_prompt(description, platform, &CampaignDraft::schema());
        self.client
            .structured(TASK, ModelTier::Flash, prompt, draft_fallback)
            .await
            .into_value()
    }

    pub async fn suggest_keywords(&self, description: &str) -> Keywords {
        const TASK: &str = "keywords";
        if is_blank(TASK, description) {
            return keywords_fallback();
        }

        let prompt = prompts::keywords_prompt(description, &Keywords::schema());
        self.client
            .structured(TASK, ModelTier::Flash, prompt, keywords_fallback)
            .await
            .into_value()
    }

    pub async fn generate_targeting_alternatives(
        &self,
        description: &str,
        platform: PlatformId,
    ) -> TargetingAlternatives {
        const TASK: &str = "targeting_alternatives";
        let fallback = || TargetingAlternatives(Vec::new());
        if is_blank(TASK, description) {
            return fallback();
        }

        let prompt = prompts::targeting_alternatives_prompt(
            description,
            platform,
            &TargetingAlternatives::schema(),
        );
        self.client
            .structured(TASK, ModelTier::Flash, prompt, fallback)
            .await
            .into_value()
    }
}
