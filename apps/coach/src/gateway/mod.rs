//! AI Gateway: the three model-backed operations the coach offers.
//!
//! Each operation is one-shot. Failures never escape: question generation
//! falls back to a fixed question, and the two structured operations return
//! `None`. Callers show an "unavailable" state instead of fabricating a report.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::llm_client::{strip_json_fences, GenerationRequest, LlmError, TextGenerator};
use crate::models::evaluation::{EvaluationReply, EvaluationResult};
use crate::models::resume::{ResumeAnalysis, ResumeAnalysisReply};
use crate::models::simulation::SimulationConfig;

pub mod prompts;

use prompts::{
    company_clause, evaluation_schema, fill_template, resume_analysis_schema,
    EVALUATION_PROMPT_TEMPLATE, QUESTION_PROMPT_TEMPLATE, QUESTION_TEMPERATURE,
    RESUME_PROMPT_TEMPLATE,
};

/// Used whenever question generation fails or comes back blank.
pub const FALLBACK_QUESTION: &str = "Could you walk me through the key drivers of a \
    3-statement financial model, and specifically how a change in inventory affects cash flows?";

/// Which model serves which operation.
#[derive(Debug, Clone)]
pub struct GatewayModels {
    /// Fast model for free-text question generation.
    pub question: String,
    /// Stronger model for the two schema-constrained operations.
    pub evaluation: String,
}

#[derive(Clone)]
pub struct AiGateway {
    llm: Arc<dyn TextGenerator>,
    models: GatewayModels,
}

impl AiGateway {
    pub fn new(llm: Arc<dyn TextGenerator>, models: GatewayModels) -> Self {
        Self { llm, models }
    }

    /// Generates one interview question for the given setup.
    /// Never fails: returns `FALLBACK_QUESTION` on any error or blank reply.
    pub async fn generate_question(&self, config: &SimulationConfig) -> String {
        let interview_type = config.interview_type.to_string();
        let clause = company_clause(config.company_focus());
        let prompt = fill_template(
            QUESTION_PROMPT_TEMPLATE,
            &[
                ("interview_type", interview_type.as_str()),
                ("role", config.role.trim()),
                ("company_clause", clause.as_str()),
            ],
        );
        let request = GenerationRequest::text(&self.models.question, prompt)
            .with_temperature(QUESTION_TEMPERATURE);

        match self.llm.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Question generation returned blank text; using fallback question");
                FALLBACK_QUESTION.to_string()
            }
            Err(e) => {
                warn!("Question generation failed: {e}; using fallback question");
                FALLBACK_QUESTION.to_string()
            }
        }
    }

    /// Grades one answer. `None` means evaluation is unavailable.
    pub async fn evaluate_answer(&self, question: &str, answer: &str) -> Option<EvaluationResult> {
        let prompt = fill_template(
            EVALUATION_PROMPT_TEMPLATE,
            &[("question", question), ("answer", answer)],
        );
        let request = GenerationRequest::json(&self.models.evaluation, prompt, evaluation_schema());

        match self.request_json::<EvaluationReply>(&request).await {
            Ok(reply) => Some(reply.into()),
            Err(e) => {
                warn!("AI evaluation failed: {e}");
                None
            }
        }
    }

    /// Runs an ATS-style scan of `resume_text` for `target_role`.
    /// `None` means the analysis is unavailable.
    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        target_role: &str,
    ) -> Option<ResumeAnalysis> {
        let prompt = fill_template(
            RESUME_PROMPT_TEMPLATE,
            &[("target_role", target_role), ("resume_text", resume_text)],
        );
        let request =
            GenerationRequest::json(&self.models.evaluation, prompt, resume_analysis_schema());

        match self.request_json::<ResumeAnalysisReply>(&request).await {
            Ok(reply) => Some(reply.into()),
            Err(e) => {
                warn!("Resume analysis failed: {e}");
                None
            }
        }
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
    ) -> Result<T, LlmError> {
        let text = self.llm.generate(request).await?;
        debug!("Model {} returned {} bytes", request.model, text.len());
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }
}
