//! Backends for exercising task callers without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use adpilot_core::{AdPilotError, Backend, GenerateRequest};
use adpilot_llm::LlmClient;
use async_trait::async_trait;

use crate::CampaignAdvisor;

pub struct FailingBackend {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Backend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<String, AdPilotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AdPilotError::LlmError("network unreachable".into()))
    }
}

pub struct CannedBackend {
    pub reply: String,
    pub seen: Mutex<Vec<GenerateRequest>>,
}

#[async_trait]
impl Backend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AdPilotError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

pub fn failing_advisor() -> (CampaignAdvisor, Arc<FailingBackend>) {
    let backend = Arc::new(FailingBackend {
        calls: AtomicUsize::new(0),
    });
    let advisor = CampaignAdvisor::new(LlmClient::new(backend.clone()));
    (advisor, backend)
}

pub fn canned_advisor(reply: &str) -> (CampaignAdvisor, Arc<CannedBackend>) {
    let backend = Arc::new(CannedBackend {
        reply: reply.to_string(),
        seen: Mutex::new(Vec::new()),
    });
    let advisor = CampaignAdvisor::new(LlmClient::new(backend.clone()));
    (advisor, backend)
}

impl FailingBackend {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
