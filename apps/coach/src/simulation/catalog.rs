use serde::{Deserialize, Serialize};

use crate::models::simulation::{InterviewType, SimulationConfig};

/// Setup choices offered to the user and the defaults a fresh or reset
/// session starts from. Injected into each controller at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupCatalog {
    pub roles: Vec<String>,
    pub companies: Vec<String>,
    pub interview_types: Vec<InterviewType>,
    pub resume_roles: Vec<String>,
    pub default_config: SimulationConfig,
    pub default_resume_role: String,
}

impl SetupCatalog {
    pub fn standard() -> Self {
        let roles = to_strings(&[
            "Investment Banking Analyst",
            "Strategy Consultant",
            "Product Manager",
            "Equity Researcher",
        ]);
        let companies = to_strings(&[
            "Goldman Sachs",
            "McKinsey & Co",
            "Google",
            "JP Morgan",
            "BCG",
            "Morgan Stanley",
            "BlackRock",
            "Amazon",
        ]);
        let resume_roles = to_strings(&[
            "Investment Banking Analyst",
            "Product Manager",
            "Software Engineer",
            "Management Consultant",
            "Private Equity Associate",
        ]);

        let default_config = SimulationConfig {
            role: roles[0].clone(),
            interview_type: InterviewType::Technical,
            company: Some(companies[0].clone()),
            duration_minutes: 20,
        };

        Self {
            default_resume_role: resume_roles[0].clone(),
            roles,
            companies,
            interview_types: InterviewType::ALL.to_vec(),
            resume_roles,
            default_config,
        }
    }
}

impl Default for SetupCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
