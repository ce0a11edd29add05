use serde::{Deserialize, Serialize};

use crate::models::normalize_score;

/// Raw evaluation reply exactly as the schema asks the model to produce it.
/// Every field is required; a reply missing any of them fails deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluationReply {
    pub score: f64,
    pub structure_score: f64,
    pub technical_score: f64,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub ideal_answer_snippet: String,
}

/// AI-graded feedback on one answer. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0 – 100
    pub score: u8,
    /// 0 – 10
    pub structure_score: u8,
    /// 0 – 10
    pub technical_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ideal_answer: String,
}

impl From<EvaluationReply> for EvaluationResult {
    fn from(reply: EvaluationReply) -> Self {
        Self {
            score: normalize_score("Score", reply.score, 100),
            structure_score: normalize_score("StructureScore", reply.structure_score, 10),
            technical_score: normalize_score("TechnicalScore", reply.technical_score, 10),
            strengths: reply.strengths,
            improvements: reply.areas_for_improvement,
            ideal_answer: reply.ideal_answer_snippet,
        }
    }
}
