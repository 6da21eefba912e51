use adpilot_core::{AdPilotError, Message, ModelTier, StructureGoal};
use adpilot_llm::Outcome;

use crate::advisor::{is_blank, CampaignAdvisor};
use crate::prompts;

pub const STRUCTURE_FALLBACK: &str =
    "Campaign structure suggestions are unavailable right now. Please try again later.";

pub const CHAT_FALLBACK: &str =
    "Sorry, I couldn't reach the AI assistant. Please try again in a moment.";

impl CampaignAdvisor {
    pub async fn suggest_campaign_structure(&self, goal: StructureGoal) -> String {
        self.client
            .text("structure", ModelTier::Flash, prompts::structure_prompt(goal), || {
                STRUCTURE_FALLBACK.to_string()
            })
            .await
            .into_value()
    }

    /// One assistant turn. The caller owns `history` and appends both the
    /// user message and the reply once this resolves.
    pub async fn chat(&self, message: &str, history: &[Message]) -> String {
        self.chat_turn(message, history).await.into_value()
    }

    /// Like [`chat`](Self::chat), but tells the caller whether the reply came
    /// from the backend. Fallback turns should not be kept in the transcript.
    pub async fn chat_turn(&self, message: &str, history: &[Message]) -> Outcome<String> {
        if is_blank("chat", message) {
            return Outcome::Fallback {
                value: CHAT_FALLBACK.to_string(),
                cause: AdPilotError::InvalidInput("empty chat message".to_string()),
            };
        }

        self.client
            .chat(history, message, || CHAT_FALLBACK.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::prompts::CHAT_SYSTEM_PROMPT;
    use crate::testing::{canned_advisor, failing_advisor};

    use super::*;

    #[tokio::test]
    async fn test_structure_advice_text() {
        let (advisor, backend) = canned_advisor("1. One campaign per product line...");
        let advice = advisor.suggest_campaign_structure(StructureGoal::Conversion).await;
        assert_eq!(advice, "1. One campaign per product line...");

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].schema.is_none());
        assert!(seen[0].prompt.contains("maximize conversions"));
    }

    #[tokio::test]
    async fn test_structure_failure() {
        let (advisor, _) = failing_advisor();
        let advice = advisor.suggest_campaign_structure(StructureGoal::Revenue).await;
        assert_eq!(advice, STRUCTURE_FALLBACK);
    }

    #[tokio::test]
    async fn test_chat_replays_history_with_system_prompt() {
        let (advisor, backend) = canned_advisor("Raise the bid cap by 10%.");
        let history = vec![
            Message::user("My TikTok CPC is high"),
            Message::model("What is your current bid strategy?"),
        ];

        let reply = advisor.chat("Cost cap at 3000", &history).await;
        assert_eq!(reply, "Raise the bid cap by 10%.");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].history, history);
        assert_eq!(seen[0].prompt, "Cost cap at 3000");
        assert_eq!(seen[0].system.as_deref(), Some(CHAT_SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn test_chat_failure_and_blank_message() {
        let (advisor, backend) = failing_advisor();
        assert_eq!(advisor.chat("hello", &[]).await, CHAT_FALLBACK);
        assert_eq!(advisor.chat("   ", &[]).await, CHAT_FALLBACK);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_turn_reports_fallback() {
        let (advisor, _) = canned_advisor("Try a cost cap.");
        let generated = advisor.chat_turn("CPC too high", &[]).await;
        assert!(!generated.is_fallback());
        assert_eq!(generated.into_value(), "Try a cost cap.");

        let blank = advisor.chat_turn("  ", &[]).await;
        assert!(matches!(blank.cause(), Some(AdPilotError::InvalidInput(_))));
        assert_eq!(blank.into_value(), CHAT_FALLBACK);

        let (failing, _) = failing_advisor();
        let failed = failing.chat_turn("hello", &[]).await;
        assert!(failed.is_fallback());
    }
}
