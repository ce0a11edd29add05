use std::fmt;

use serde::{Deserialize, Serialize};

/// Interview flavour chosen at setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewType {
    #[default]
    Technical,
    Behavioral,
    Case,
    Mixed,
}

impl InterviewType {
    pub const ALL: [InterviewType; 4] = [
        InterviewType::Technical,
        InterviewType::Behavioral,
        InterviewType::Case,
        InterviewType::Mixed,
    ];
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewType::Technical => "Technical",
            InterviewType::Behavioral => "Behavioral",
            InterviewType::Case => "Case",
            InterviewType::Mixed => "Mixed",
        };
        f.write_str(label)
    }
}

/// User-chosen parameters for one mock session.
///
/// Editable only while the session is in setup; frozen once the interview begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub role: String,
    pub interview_type: InterviewType,
    pub company: Option<String>,
    /// Informational only. The interview clock is never stopped at this limit.
    pub duration_minutes: u32,
}

impl SimulationConfig {
    /// Company with surrounding whitespace removed; blank companies count as none.
    pub fn company_focus(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
