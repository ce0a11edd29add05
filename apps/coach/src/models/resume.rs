use serde::{Deserialize, Serialize};

use crate::models::normalize_score;

/// One suggested rewrite of a resume bullet.
///
/// The schema does not mark these fields required, so absent ones become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletRewrite {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub improved: String,
    #[serde(default)]
    pub reason: String,
}

/// Raw resume-analysis reply as requested by the schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeAnalysisReply {
    pub overall_match: f64,
    pub missing_keywords: Vec<String>,
    pub weak_points: Vec<String>,
    pub tweaked_bullet_points: Vec<BulletRewrite>,
    pub professional_summary_advice: String,
}

/// ATS-style scan of a resume against a target role.
/// Replaced wholesale on every re-scan; never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// 0 – 100
    pub overall_match: u8,
    pub missing_keywords: Vec<String>,
    pub weak_points: Vec<String>,
    pub bullet_rewrites: Vec<BulletRewrite>,
    pub summary_advice: String,
}

impl From<ResumeAnalysisReply> for ResumeAnalysis {
    fn from(reply: ResumeAnalysisReply) -> Self {
        Self {
            overall_match: normalize_score("OverallMatch", reply.overall_match, 100),
            missing_keywords: reply.missing_keywords,
            weak_points: reply.weak_points,
            bullet_rewrites: reply.tweaked_bullet_points,
            summary_advice: reply.professional_summary_advice,
        }
    }
}
