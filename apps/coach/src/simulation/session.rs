//! The mock-interview state machine.
//!
//! Steps only move forward (setup → interview → feedback); the one way back is
//! `reset`. `Limit` is entered from setup when the session quota is spent.
//! Each step carries only the data valid in it, so a question without an
//! interview, or feedback without an evaluation, cannot be represented.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::CoachError;
use crate::models::evaluation::EvaluationResult;
use crate::models::simulation::SimulationConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewState {
    pub question: String,
    pub answer: String,
    pub elapsed_secs: u64,
    /// Cosmetic only: no audio is captured. Drives the answer clock.
    pub recording: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackState {
    pub question: String,
    pub answer: String,
    pub elapsed_secs: u64,
    pub evaluation: EvaluationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SimulationStep {
    Setup,
    Interview(InterviewState),
    Feedback(FeedbackState),
    Limit,
}

impl SimulationStep {
    pub fn name(&self) -> &'static str {
        match self {
            SimulationStep::Setup => "setup",
            SimulationStep::Interview(_) => "interview",
            SimulationStep::Feedback(_) => "feedback",
            SimulationStep::Limit => "limit",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSession {
    pub id: Uuid,
    pub config: SimulationConfig,
    pub step: SimulationStep,
    pub created_at: DateTime<Utc>,
}

impl SimulationSession {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            step: SimulationStep::Setup,
            created_at: Utc::now(),
        }
    }

    fn wrong_step(&self, action: &'static str) -> CoachError {
        CoachError::InvalidTransition {
            action,
            step: self.step.name(),
        }
    }

    pub(crate) fn ensure_setup(&self, action: &'static str) -> Result<(), CoachError> {
        match self.step {
            SimulationStep::Setup => Ok(()),
            _ => Err(self.wrong_step(action)),
        }
    }

    fn interview_mut(&mut self, action: &'static str) -> Result<&mut InterviewState, CoachError> {
        let step = self.step.name();
        match &mut self.step {
            SimulationStep::Interview(interview) => Ok(interview),
            _ => Err(CoachError::InvalidTransition { action, step }),
        }
    }

    pub fn interview(&self) -> Option<&InterviewState> {
        match &self.step {
            SimulationStep::Interview(interview) => Some(interview),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<&FeedbackState> {
        match &self.step {
            SimulationStep::Feedback(feedback) => Some(feedback),
            _ => None,
        }
    }

    /// Replaces the setup parameters. Only allowed before the interview starts.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<(), CoachError> {
        self.ensure_setup("configure")?;
        validate_config(&config)?;
        self.config = config;
        Ok(())
    }

    pub fn start_interview(&mut self, question: String) -> Result<(), CoachError> {
        self.ensure_setup("begin")?;
        self.step = SimulationStep::Interview(InterviewState {
            question,
            answer: String::new(),
            elapsed_secs: 0,
            recording: false,
        });
        Ok(())
    }

    pub fn enter_limit(&mut self) -> Result<(), CoachError> {
        self.ensure_setup("begin")?;
        self.step = SimulationStep::Limit;
        Ok(())
    }

    pub fn set_answer(&mut self, answer: String) -> Result<(), CoachError> {
        self.interview_mut("edit the answer")?.answer = answer;
        Ok(())
    }

    pub fn set_recording(&mut self, recording: bool) -> Result<(), CoachError> {
        self.interview_mut("toggle recording")?.recording = recording;
        Ok(())
    }

    /// Advances the answer clock by one second. Returns false when the clock
    /// should stop: the session left the interview or recording is off.
    pub fn tick(&mut self) -> bool {
        match &mut self.step {
            SimulationStep::Interview(interview) if interview.recording => {
                interview.elapsed_secs += 1;
                true
            }
            _ => false,
        }
    }

    /// Moves interview → feedback, keeping the question and answer that were graded.
    pub fn complete(&mut self, evaluation: EvaluationResult) -> Result<(), CoachError> {
        let interview = self.interview_mut("finalize")?;
        let feedback = FeedbackState {
            question: std::mem::take(&mut interview.question),
            answer: std::mem::take(&mut interview.answer),
            elapsed_secs: interview.elapsed_secs,
            evaluation,
        };
        self.step = SimulationStep::Feedback(feedback);
        Ok(())
    }

    /// Back to setup from any step. Question, answer, clock and feedback are
    /// dropped with the step; the config returns to `defaults`.
    pub fn reset(&mut self, defaults: SimulationConfig) {
        self.step = SimulationStep::Setup;
        self.config = defaults;
    }
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), CoachError> {
    if config.role.trim().is_empty() {
        return Err(CoachError::Validation("role cannot be empty".to_string()));
    }
    if config.duration_minutes == 0 {
        return Err(CoachError::Validation(
            "duration_minutes must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Formats elapsed seconds as the interview clock shows them, e.g. `2:05`.
pub fn format_clock(elapsed_secs: u64) -> String {
    format!("{}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}
