use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Facebook,
    Google,
    Tiktok,
    Zalo,
}

impl PlatformId {
    pub const ALL: [PlatformId; 4] = [
        PlatformId::Facebook,
        PlatformId::Google,
        PlatformId::Tiktok,
        PlatformId::Zalo,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PlatformId::Facebook => "facebook",
            PlatformId::Google => "google",
            PlatformId::Tiktok => "tiktok",
            PlatformId::Zalo => "zalo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformId::Facebook => "Facebook Ads",
            PlatformId::Google => "Google Ads",
            PlatformId::Tiktok => "TikTok Ads",
            PlatformId::Zalo => "Zalo Ads",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    #[default]
    Draft,
}

/// Bounded snapshot of a campaign, the only campaign data ever embedded in a
/// prompt. `ctr` is a percentage (2.5 means 2.5 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: String,
    pub name: String,
    pub platform: PlatformId,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub status: CampaignStatus,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub ctr: f64,
}

/// Backend capability tier. Data-heavy tasks go to `Pro`, drafting and chat to `Flash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Pro,
    Flash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureGoal {
    Conversion,
    Revenue,
}

impl StructureGoal {
    pub fn describe(&self) -> &'static str {
        match self {
            StructureGoal::Conversion => "maximize conversions",
            StructureGoal::Revenue => "maximize revenue (GMV)",
        }
    }
}
