//! Single request/response cycle: collect resume text, scan it, show the report.
//!
//! Text can arrive three ways (typed, uploaded, dropped); the last two both
//! go through `load_file_contents`. A scan replaces the previous report
//! wholesale, including with nothing when the analysis is unavailable.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::CoachError;
use crate::gateway::AiGateway;
use crate::models::resume::ResumeAnalysis;
use crate::resume::file_input::{decode_text, read_text_file};
use crate::tier::reports::ResumeReport;
use crate::tier::UserTier;

struct ScanState {
    resume_text: String,
    target_role: String,
    result: Option<ResumeAnalysis>,
    scanned_at: Option<DateTime<Utc>>,
    in_flight: Option<AbortHandle>,
    epoch: u64,
}

impl ScanState {
    fn can_scan(&self) -> bool {
        self.in_flight.is_none() && !self.resume_text.trim().is_empty()
    }

    fn cancel(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeScanView {
    pub scan_id: Uuid,
    pub target_role: String,
    pub resume_text: String,
    pub can_scan: bool,
    pub loading: bool,
    pub report: Option<ResumeReport>,
    pub scanned_at: Option<DateTime<Utc>>,
    /// Free users see the upgrade prompt next to the report.
    pub show_upgrade: bool,
}

pub struct ResumeScanController {
    id: Uuid,
    inner: Arc<Mutex<ScanState>>,
    gateway: AiGateway,
    tier: UserTier,
}

impl ResumeScanController {
    pub fn new(gateway: AiGateway, target_role: impl Into<String>, tier: UserTier) -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Arc::new(Mutex::new(ScanState {
                resume_text: String::new(),
                target_role: target_role.into(),
                result: None,
                scanned_at: None,
                in_flight: None,
                epoch: 0,
            })),
            gateway,
            tier,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn view(&self) -> ResumeScanView {
        let state = self.inner.lock();
        self.render(&state)
    }

    fn render(&self, state: &ScanState) -> ResumeScanView {
        ResumeScanView {
            scan_id: self.id,
            target_role: state.target_role.clone(),
            resume_text: state.resume_text.clone(),
            can_scan: state.can_scan(),
            loading: state.in_flight.is_some(),
            report: state
                .result
                .as_ref()
                .map(|analysis| ResumeReport::build(self.tier, analysis)),
            scanned_at: state.scanned_at,
            show_upgrade: self.tier == UserTier::Free,
        }
    }

    /// The latest analysis, ungated.
    pub fn result(&self) -> Option<ResumeAnalysis> {
        self.inner.lock().result.clone()
    }

    pub fn can_scan(&self) -> bool {
        self.inner.lock().can_scan()
    }

    pub fn set_text(&self, text: impl Into<String>) -> ResumeScanView {
        let mut state = self.inner.lock();
        state.resume_text = text.into();
        self.render(&state)
    }

    /// Empties the editor. An existing report stays until the next scan.
    pub fn clear(&self) -> ResumeScanView {
        self.set_text(String::new())
    }

    pub fn set_target_role(&self, role: impl Into<String>) -> Result<ResumeScanView, CoachError> {
        let role = role.into();
        if role.trim().is_empty() {
            return Err(CoachError::Validation(
                "target role cannot be empty".to_string(),
            ));
        }
        let mut state = self.inner.lock();
        state.target_role = role;
        Ok(self.render(&state))
    }

    /// Sets the resume text from raw file bytes (upload or drag-and-drop).
    pub fn load_file_contents(&self, bytes: &[u8]) -> ResumeScanView {
        let text = decode_text(bytes);
        info!("Loaded resume file ({} bytes)", bytes.len());
        self.set_text(text)
    }

    /// Reads a plain-text file from disk and loads it as the resume text.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> Result<ResumeScanView, CoachError> {
        let text = read_text_file(path).await?;
        Ok(self.set_text(text))
    }

    /// Runs the ATS scan on the current text.
    ///
    /// The previous report is replaced by whatever comes back. When the
    /// analysis is unavailable the report is cleared and `AnalysisUnavailable`
    /// is returned.
    pub async fn scan(&self) -> Result<ResumeScanView, CoachError> {
        let task = {
            let mut state = self.inner.lock();
            if state.in_flight.is_some() {
                return Err(CoachError::Busy);
            }
            if state.resume_text.trim().is_empty() {
                return Err(CoachError::Validation(
                    "resume text cannot be empty".to_string(),
                ));
            }

            let epoch = state.epoch;
            let resume_text = state.resume_text.clone();
            let target_role = state.target_role.clone();
            let gateway = self.gateway.clone();
            let inner = Arc::clone(&self.inner);
            let scan_id = self.id;

            let task = tokio::spawn(async move {
                let analysis = gateway.analyze_resume(&resume_text, &target_role).await;
                let mut state = inner.lock();
                if state.epoch != epoch {
                    return Err(CoachError::Cancelled);
                }
                state.in_flight = None;
                state.scanned_at = Some(Utc::now());
                state.result = analysis;
                match &state.result {
                    Some(analysis) => {
                        info!(
                            "Resume scan {scan_id} for '{target_role}': match={}%",
                            analysis.overall_match
                        );
                        Ok(())
                    }
                    None => {
                        warn!("Resume scan {scan_id} unavailable");
                        Err(CoachError::AnalysisUnavailable)
                    }
                }
            });
            state.in_flight = Some(task.abort_handle());
            task
        };

        match task.await {
            Ok(result) => result?,
            Err(e) if e.is_cancelled() => return Err(CoachError::Cancelled),
            Err(e) => {
                return Err(CoachError::Internal(anyhow::anyhow!(
                    "resume scan task failed: {e}"
                )))
            }
        }
        Ok(self.view())
    }

    /// Drops text, report and any in-flight scan.
    pub fn reset(&self) -> ResumeScanView {
        let mut state = self.inner.lock();
        state.cancel();
        state.resume_text.clear();
        state.result = None;
        state.scanned_at = None;
        self.render(&state)
    }

    /// Cancels an in-flight scan without touching text or report. Also runs on drop.
    pub fn shutdown(&self) {
        self.inner.lock().cancel();
    }
}

impl Drop for ResumeScanController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::gateway::GatewayModels;
    use crate::llm_client::scripted::ScriptedGenerator;

    const ANALYSIS_JSON: &str = r#"{
        "OverallMatch": 71,
        "MissingKeywords": ["LBO", "Pitch books"],
        "WeakPoints": ["Passive verbs"],
        "TweakedBulletPoints": [
            {"original": "Managed team of 5.", "improved": "Led a 5-person deal team", "reason": "Ownership"}
        ],
        "ProfessionalSummaryAdvice": "Open with transaction experience."
    }"#;

    fn controller(generator: ScriptedGenerator, tier: UserTier) -> ResumeScanController {
        let gateway = AiGateway::new(
            generator.into_arc(),
            GatewayModels {
                question: "flash".to_string(),
                evaluation: "pro".to_string(),
            },
        );
        ResumeScanController::new(gateway, "Investment Banking Analyst", tier)
    }

    #[tokio::test]
    async fn test_empty_text_disables_scan() {
        let controller = controller(ScriptedGenerator::new(), UserTier::Free);
        assert!(!controller.can_scan());
        controller.set_text("   \n");
        assert!(!controller.view().can_scan);
        assert!(matches!(
            controller.scan().await,
            Err(CoachError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_scan_stores_gated_report() {
        let controller = controller(ScriptedGenerator::new().reply(ANALYSIS_JSON), UserTier::Free);
        controller.set_text("Jane Doe, Analyst, 2 years M&A");

        let view = controller.scan().await.unwrap();

        assert!(!view.loading);
        assert!(view.scanned_at.is_some());
        let report = view.report.unwrap();
        assert_eq!(report.overall_match.content(), Some(&71));
        assert!(report.bullet_rewrites.is_locked());
        assert!(view.show_upgrade);
        assert_eq!(controller.result().unwrap().bullet_rewrites.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_rescan_replaces_previous_report() {
        let controller = controller(
            ScriptedGenerator::new().reply(ANALYSIS_JSON).reply("{broken"),
            UserTier::Pro,
        );
        controller.set_text("resume");
        controller.scan().await.unwrap();
        assert!(controller.result().is_some());

        let err = controller.scan().await.unwrap_err();
        assert!(matches!(err, CoachError::AnalysisUnavailable));
        assert!(controller.result().is_none());
        assert!(controller.view().report.is_none());
    }

    #[tokio::test]
    async fn test_file_contents_funnel_into_text() {
        let controller = controller(ScriptedGenerator::new(), UserTier::Free);
        let view = controller.load_file_contents(b"\xEF\xBB\xBFJane Doe\nVP, Strategy");
        assert_eq!(view.resume_text, "Jane Doe\nVP, Strategy");
        assert!(view.can_scan);

        assert!(controller.clear().resume_text.is_empty());
    }

    #[tokio::test]
    async fn test_blank_target_role_rejected() {
        let controller = controller(ScriptedGenerator::new(), UserTier::Free);
        assert!(controller.set_target_role(" ").is_err());
        assert_eq!(
            controller.set_target_role("Product Manager").unwrap().target_role,
            "Product Manager"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_in_flight_and_reset_cancels() {
        let controller = Arc::new(controller(
            ScriptedGenerator::new()
                .with_delay(Duration::from_secs(30))
                .reply(ANALYSIS_JSON),
            UserTier::Pro,
        ));
        controller.set_text("resume");

        let pending = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.scan().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let view = controller.view();
        assert!(view.loading);
        assert!(!view.can_scan);
        assert!(matches!(controller.scan().await, Err(CoachError::Busy)));

        controller.reset();
        assert!(matches!(pending.await.unwrap(), Err(CoachError::Cancelled)));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(controller.result().is_none());
        assert!(!controller.view().loading);
    }
}
