use thiserror::Error;

/// Errors surfaced by the flow controllers.
///
/// Model failures inside the gateway never appear here directly: they are
/// collapsed to a fallback or `None`, and the controller reports the
/// resulting "unavailable" state.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot {action} while the session is in the {step} step")]
    InvalidTransition {
        action: &'static str,
        step: &'static str,
    },

    #[error("An AI request is already in flight")]
    Busy,

    #[error("Evaluation is unavailable right now")]
    EvaluationUnavailable,

    #[error("Resume analysis is unavailable right now")]
    AnalysisUnavailable,

    #[error("Request was cancelled because the session was reset or closed")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CoachError {
    /// True for the neutral "try again later" outcomes the UI shows without an error banner.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            CoachError::EvaluationUnavailable | CoachError::AnalysisUnavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message_names_step() {
        let err = CoachError::InvalidTransition {
            action: "finalize",
            step: "setup",
        };
        assert_eq!(
            err.to_string(),
            "Cannot finalize while the session is in the setup step"
        );
    }

    #[test]
    fn test_unavailable_classification() {
        assert!(CoachError::EvaluationUnavailable.is_unavailable());
        assert!(CoachError::AnalysisUnavailable.is_unavailable());
        assert!(!CoachError::Busy.is_unavailable());
    }
}
