//! Tier-gated views of AI results, ready for rendering.

use serde::Serialize;

use crate::models::evaluation::EvaluationResult;
use crate::models::resume::{BulletRewrite, ResumeAnalysis};
use crate::tier::{gate, Gated, ReportSection, UserTier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: u8,
    pub structure_score: u8,
    pub technical_score: u8,
}

impl ScoreCard {
    /// The headline figure as rendered, e.g. "78%".
    pub fn headline(&self) -> String {
        format!("{}%", self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackLists {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub scores: Gated<ScoreCard>,
    pub feedback: Gated<FeedbackLists>,
    pub ideal_answer: Gated<String>,
}

impl EvaluationReport {
    pub fn build(tier: UserTier, result: &EvaluationResult) -> Self {
        Self {
            scores: gate(
                tier,
                ReportSection::EvaluationScores,
                ScoreCard {
                    score: result.score,
                    structure_score: result.structure_score,
                    technical_score: result.technical_score,
                },
            ),
            feedback: gate(
                tier,
                ReportSection::EvaluationFeedback,
                FeedbackLists {
                    strengths: result.strengths.clone(),
                    improvements: result.improvements.clone(),
                },
            ),
            ideal_answer: gate(
                tier,
                ReportSection::EvaluationIdealAnswer,
                result.ideal_answer.clone(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeReport {
    pub overall_match: Gated<u8>,
    pub missing_keywords: Gated<Vec<String>>,
    pub summary_advice: Gated<String>,
    pub weak_points: Gated<Vec<String>>,
    pub bullet_rewrites: Gated<Vec<BulletRewrite>>,
}

impl ResumeReport {
    pub fn build(tier: UserTier, analysis: &ResumeAnalysis) -> Self {
        Self {
            overall_match: gate(tier, ReportSection::ResumeOverallMatch, analysis.overall_match),
            missing_keywords: gate(
                tier,
                ReportSection::ResumeMissingKeywords,
                analysis.missing_keywords.clone(),
            ),
            summary_advice: gate(
                tier,
                ReportSection::ResumeSummaryAdvice,
                analysis.summary_advice.clone(),
            ),
            weak_points: gate(
                tier,
                ReportSection::ResumeWeakPoints,
                analysis.weak_points.clone(),
            ),
            bullet_rewrites: gate(
                tier,
                ReportSection::ResumeBulletRewrites,
                analysis.bullet_rewrites.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation() -> EvaluationResult {
        EvaluationResult {
            score: 78,
            structure_score: 8,
            technical_score: 7,
            strengths: vec!["Structured".to_string()],
            improvements: vec!["Quantify".to_string()],
            ideal_answer: "Model answer".to_string(),
        }
    }

    fn analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            overall_match: 64,
            missing_keywords: vec!["LBO".to_string()],
            weak_points: vec!["Vague impact".to_string()],
            bullet_rewrites: vec![BulletRewrite {
                original: "Managed team of 5.".to_string(),
                improved: "Led a 5-person deal team".to_string(),
                reason: "Ownership".to_string(),
            }],
            summary_advice: "Lead with deals".to_string(),
        }
    }

    #[test]
    fn test_free_evaluation_hides_only_model_answer() {
        let report = EvaluationReport::build(UserTier::Free, &evaluation());
        assert_eq!(report.scores.content().map(ScoreCard::headline), Some("78%".to_string()));
        assert!(!report.feedback.is_locked());
        assert!(report.ideal_answer.is_locked());
    }

    #[test]
    fn test_free_resume_report_locks_refinements() {
        let report = ResumeReport::build(UserTier::Free, &analysis());
        assert_eq!(report.overall_match.content(), Some(&64));
        assert!(!report.missing_keywords.is_locked());
        assert!(!report.summary_advice.is_locked());
        assert!(report.weak_points.is_locked());
        assert!(report.bullet_rewrites.is_locked());

        let rendered = serde_json::to_string(&report).unwrap();
        assert!(!rendered.contains("Led a 5-person deal team"));
        assert!(!rendered.contains("Vague impact"));
    }

    #[test]
    fn test_pro_resume_report_shows_rewrites() {
        let report = ResumeReport::build(UserTier::Pro, &analysis());
        assert_eq!(report.bullet_rewrites.content().map(Vec::len), Some(1));
        assert!(!report.weak_points.is_locked());
    }
}
