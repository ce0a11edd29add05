#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use coach::gateway::GatewayModels;
use coach::llm_client::{GenerationRequest, LlmError, TextGenerator};
use coach::simulation::catalog::SetupCatalog;
use coach::tier::UserTier;
use coach::Coach;
use parking_lot::Mutex;

/// Replays canned model replies in order; records the prompts it saw.
#[derive(Default)]
pub struct CannedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub fn with_replies(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::default(),
        })
    }
}

#[async_trait]
impl TextGenerator for CannedModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.prompts.lock().push(request.prompt.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn build_coach(model: Arc<CannedModel>, tier: UserTier, free_quota: u32) -> Coach {
    Coach::new(
        model,
        GatewayModels {
            question: "gemini-3-flash-preview".to_string(),
            evaluation: "gemini-3-pro-preview".to_string(),
        },
        SetupCatalog::standard(),
        tier,
        free_quota,
    )
}

pub const EVALUATION_78: &str = r#"{
    "Score": 78,
    "StructureScore": 8,
    "TechnicalScore": 7,
    "Strengths": ["Led with the answer before the detail", "Correct treatment of working capital"],
    "AreasForImprovement": ["Quantify the inventory impact", "Close with the cash conversion cycle"],
    "IdealAnswerSnippet": "An increase in inventory is a use of cash, so CFO falls..."
}"#;
