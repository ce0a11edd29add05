//! Tier Gate: decides which report sections a user may see.
//!
//! The tier is fixed for the lifetime of a `Coach`. Nothing here changes it:
//! the upgrade action only returns the promotional offer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod offer;
pub mod quota;
pub mod reports;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    #[default]
    Free,
    Pro,
}

impl fmt::Display for UserTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserTier::Free => f.write_str("free"),
            UserTier::Pro => f.write_str("pro"),
        }
    }
}

impl FromStr for UserTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(UserTier::Free),
            "pro" => Ok(UserTier::Pro),
            other => Err(format!("unknown tier '{other}' (expected 'free' or 'pro')")),
        }
    }
}

/// Report sections the gate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    EvaluationScores,
    EvaluationFeedback,
    EvaluationIdealAnswer,
    ResumeOverallMatch,
    ResumeMissingKeywords,
    ResumeSummaryAdvice,
    ResumeWeakPoints,
    ResumeBulletRewrites,
}

impl ReportSection {
    pub fn is_pro_only(self) -> bool {
        matches!(
            self,
            ReportSection::EvaluationIdealAnswer
                | ReportSection::ResumeWeakPoints
                | ReportSection::ResumeBulletRewrites
        )
    }

    fn call_to_action(self) -> &'static str {
        match self {
            ReportSection::EvaluationIdealAnswer => {
                "Upgrade to Pro to see the interviewer's model answer"
            }
            ReportSection::ResumeWeakPoints => "Upgrade to Pro to see every weak point we found",
            ReportSection::ResumeBulletRewrites => {
                "Upgrade to Pro for AI-optimized bullet points tailored to your target role"
            }
            _ => "Upgrade to Pro to unlock this section",
        }
    }
}

pub fn is_visible(tier: UserTier, section: ReportSection) -> bool {
    tier == UserTier::Pro || !section.is_pro_only()
}

/// A report section after gating. `Locked` never carries the underlying content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Gated<T> {
    Visible { content: T },
    Locked { call_to_action: String },
}

impl<T> Gated<T> {
    pub fn is_locked(&self) -> bool {
        matches!(self, Gated::Locked { .. })
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Gated::Visible { content } => Some(content),
            Gated::Locked { .. } => None,
        }
    }
}

/// Wraps `content` for `section` according to `tier`. Locked content is dropped here.
pub fn gate<T>(tier: UserTier, section: ReportSection, content: T) -> Gated<T> {
    if is_visible(tier, section) {
        Gated::Visible { content }
    } else {
        Gated::Locked {
            call_to_action: section.call_to_action().to_string(),
        }
    }
}
