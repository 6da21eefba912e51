use adpilot_llm::LlmClient;
use tracing::warn;

use crate::prompts::CHAT_SYSTEM_PROMPT;

/// Entry point for every AI-assisted task. Each task lives in its own module
/// as an `impl CampaignAdvisor` block binding a prompt, a schema and a
/// fallback to the shared client.
#[derive(Clone)]
pub struct CampaignAdvisor {
    pub(crate) client: LlmClient,
}

impl CampaignAdvisor {
    pub fn new(client: LlmClient) -> Self {
        Self {
            client: client.with_system_prompt(CHAT_SYSTEM_PROMPT),
        }
    }
}

/// True when a required free-text input is empty; the task then answers with
/// its fallback and no prompt is built.
pub(crate) fn is_blank(task: &str, input: &str) -> bool {
    if input.trim().is_empty() {
        warn!("{}: empty input, skipping backend call", task);
        return true;
    }
    false
}

/// Budgets arrive from forms; anything negative or non-finite counts as zero.
pub(crate) fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}
