use adpilot_core::{AdPilotConfig, AdPilotError, Message};
use adpilot_llm::LlmClient;
use adpilot_tasks::CampaignAdvisor;
use dashmap::DashMap;
use tracing::info;

pub struct AppState {
    pub advisor: CampaignAdvisor,
    /// Chat transcripts per connection uuid. The orchestration layer never
    /// stores history; this server is the caller that owns it.
    pub conversations: DashMap<String, Vec<Message>>,
}

impl AppState {
    pub fn new(config: &AdPilotConfig) -> Result<Self, AdPilotError> {
        let client = LlmClient::from_config(&config.llm)?;
        info!(
            "Using {} backend (pro: {}, flash: {})",
            client.backend_name(),
            config.llm.pro_model,
            config.llm.flash_model
        );
        Ok(Self::with_advisor(CampaignAdvisor::new(client)))
    }

    pub fn with_advisor(advisor: CampaignAdvisor) -> Self {
        Self {
            advisor,
            conversations: DashMap::new(),
        }
    }

    pub fn get_conversation(&self, uuid: &str) -> Vec<Message> {
        self.conversations
            .get(uuid)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn remove_conversation(&self, uuid: &str) {
        self.conversations.remove(uuid);
    }

    pub fn add_message(&self, uuid: &str, message: Message) {
        self.conversations
            .entry(uuid.to_string())
            .or_default()
            .push(message);
    }
}
