//! Drives one `SimulationSession` through its steps.
//!
//! Gateway calls run as spawned tasks whose abort handles are kept here, so
//! `reset` and teardown cancel them. Each task also carries the epoch it was
//! spawned in and drops its result if the session has been reset since:
//! a late reply can never land in a fresh session.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::CoachError;
use crate::gateway::AiGateway;
use crate::models::simulation::SimulationConfig;
use crate::simulation::catalog::SetupCatalog;
use crate::simulation::session::{format_clock, SimulationSession, SimulationStep};
use crate::simulation::timer::spawn_ticker;
use crate::tier::offer::UpgradeOffer;
use crate::tier::quota::QuotaTracker;
use crate::tier::reports::EvaluationReport;
use crate::tier::UserTier;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingCall {
    Question,
    Evaluation,
}

struct InFlight {
    call: PendingCall,
    handle: AbortHandle,
}

struct ControllerState {
    session: SimulationSession,
    /// Bumped on every reset. Tasks spawned under an older epoch are stale.
    epoch: u64,
    in_flight: Option<InFlight>,
    timer: Option<AbortHandle>,
}

impl ControllerState {
    fn ensure_idle(&self) -> Result<(), CoachError> {
        match self.in_flight {
            Some(_) => Err(CoachError::Busy),
            None => Ok(()),
        }
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn cancel_all(&mut self) {
        self.stop_timer();
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

/// Snapshot of a session for rendering. Evaluation content is tier-gated.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationView {
    pub session_id: Uuid,
    pub step: &'static str,
    pub config: SimulationConfig,
    pub loading: Option<PendingCall>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub elapsed_secs: u64,
    pub clock: String,
    pub recording: bool,
    pub can_finalize: bool,
    pub report: Option<EvaluationReport>,
    pub simulations_left: Option<u32>,
    pub upgrade_offer: Option<UpgradeOffer>,
}

pub struct SimulationController {
    inner: Arc<Mutex<ControllerState>>,
    gateway: AiGateway,
    catalog: Arc<SetupCatalog>,
    quota: QuotaTracker,
    tier: UserTier,
}

impl SimulationController {
    pub fn new(
        gateway: AiGateway,
        catalog: Arc<SetupCatalog>,
        quota: QuotaTracker,
        tier: UserTier,
    ) -> Self {
        let session = SimulationSession::new(catalog.default_config.clone());
        Self {
            inner: Arc::new(Mutex::new(ControllerState {
                session,
                epoch: 0,
                in_flight: None,
                timer: None,
            })),
            gateway,
            catalog,
            quota,
            tier,
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.lock().session.id
    }

    pub fn catalog(&self) -> &SetupCatalog {
        &self.catalog
    }

    /// A copy of the current session state.
    pub fn session(&self) -> SimulationSession {
        self.inner.lock().session.clone()
    }

    pub fn view(&self) -> SimulationView {
        let state = self.inner.lock();
        self.render(&state)
    }

    fn render(&self, state: &ControllerState) -> SimulationView {
        let session = &state.session;
        let interview = session.interview();
        let feedback = session.feedback();

        let question = interview
            .map(|i| i.question.clone())
            .or_else(|| feedback.map(|f| f.question.clone()));
        let answer = interview
            .map(|i| i.answer.clone())
            .or_else(|| feedback.map(|f| f.answer.clone()));
        let elapsed_secs = interview
            .map(|i| i.elapsed_secs)
            .or_else(|| feedback.map(|f| f.elapsed_secs))
            .unwrap_or(0);

        SimulationView {
            session_id: session.id,
            step: session.step.name(),
            config: session.config.clone(),
            loading: state.in_flight.as_ref().map(|f| f.call),
            question,
            answer,
            elapsed_secs,
            clock: format_clock(elapsed_secs),
            recording: interview.map(|i| i.recording).unwrap_or(false),
            can_finalize: state.in_flight.is_none()
                && interview.is_some_and(|i| !i.answer.trim().is_empty()),
            report: feedback.map(|f| EvaluationReport::build(self.tier, &f.evaluation)),
            simulations_left: self.quota.remaining(),
            upgrade_offer: matches!(session.step, SimulationStep::Limit)
                .then(UpgradeOffer::standard),
        }
    }

    /// Replaces the setup parameters. Only valid in setup.
    pub fn configure(&self, config: SimulationConfig) -> Result<SimulationView, CoachError> {
        let mut state = self.inner.lock();
        state.ensure_idle()?;
        state.session.configure(config)?;
        Ok(self.render(&state))
    }

    /// Starts the interview: requests a question and moves to the interview step.
    ///
    /// This transition does not fail on model errors; the fallback question
    /// is used instead. With the session quota spent, the session moves to
    /// `limit` instead. A begin cancelled by `reset` costs no quota.
    pub async fn begin(&self) -> Result<SimulationView, CoachError> {
        let task: JoinHandle<Result<(), CoachError>> = {
            let mut state = self.inner.lock();
            state.ensure_idle()?;
            state.session.ensure_setup("begin")?;

            if self.quota.is_exhausted() {
                state.session.enter_limit()?;
                info!("Session {} hit the simulation limit", state.session.id);
                return Ok(self.render(&state));
            }

            let epoch = state.epoch;
            let config = state.session.config.clone();
            let gateway = self.gateway.clone();
            let quota = self.quota.clone();
            let inner = Arc::clone(&self.inner);

            let task = tokio::spawn(async move {
                let question = gateway.generate_question(&config).await;
                let mut state = inner.lock();
                if state.epoch != epoch {
                    return Err(CoachError::Cancelled);
                }
                state.in_flight = None;
                // Charged only once the interview actually starts.
                if !quota.try_consume() {
                    state.session.enter_limit()?;
                    info!("Session {} hit the simulation limit", state.session.id);
                    return Ok(());
                }
                state.session.start_interview(question)?;
                info!(
                    "Session {} started: {} / {}",
                    state.session.id, config.role, config.interview_type
                );
                Ok(())
            });
            state.in_flight = Some(InFlight {
                call: PendingCall::Question,
                handle: task.abort_handle(),
            });
            task
        };

        join_call(task).await?;
        Ok(self.view())
    }

    /// Replaces the draft answer. Rejected while the answer is being graded.
    pub fn set_answer(&self, answer: impl Into<String>) -> Result<SimulationView, CoachError> {
        let mut state = self.inner.lock();
        state.ensure_idle()?;
        state.session.set_answer(answer.into())?;
        Ok(self.render(&state))
    }

    /// Flips the recording flag. Recording on runs the answer clock; off stops it.
    pub fn toggle_recording(&self) -> Result<SimulationView, CoachError> {
        let mut state = self.inner.lock();
        let recording = match state.session.interview() {
            Some(interview) => !interview.recording,
            None => {
                return Err(CoachError::InvalidTransition {
                    action: "toggle recording",
                    step: state.session.step.name(),
                })
            }
        };
        state.session.set_recording(recording)?;
        state.stop_timer();

        if recording {
            let inner = Arc::clone(&self.inner);
            let epoch = state.epoch;
            state.timer = Some(spawn_ticker(TICK_PERIOD, move || {
                let mut state = inner.lock();
                state.epoch == epoch && state.session.tick()
            }));
        }
        Ok(self.render(&state))
    }

    /// Submits the answer for grading and moves to feedback.
    ///
    /// When the gateway cannot produce an evaluation the session stays in the
    /// interview step with its answer intact and `EvaluationUnavailable` is
    /// returned. Nothing is retried automatically.
    pub async fn finalize(&self) -> Result<SimulationView, CoachError> {
        let task: JoinHandle<Result<(), CoachError>> = {
            let mut state = self.inner.lock();
            state.ensure_idle()?;
            let (question, answer) = match state.session.interview() {
                Some(interview) => (interview.question.clone(), interview.answer.clone()),
                None => {
                    return Err(CoachError::InvalidTransition {
                        action: "finalize",
                        step: state.session.step.name(),
                    })
                }
            };
            if answer.trim().is_empty() {
                return Err(CoachError::Validation(
                    "answer cannot be empty".to_string(),
                ));
            }

            let epoch = state.epoch;
            let gateway = self.gateway.clone();
            let inner = Arc::clone(&self.inner);

            let task = tokio::spawn(async move {
                let evaluation = gateway.evaluate_answer(&question, &answer).await;
                let mut state = inner.lock();
                if state.epoch != epoch {
                    return Err(CoachError::Cancelled);
                }
                state.in_flight = None;
                match evaluation {
                    Some(evaluation) => {
                        let score = evaluation.score;
                        state.stop_timer();
                        state.session.complete(evaluation)?;
                        info!("Session {} evaluated: score={score}", state.session.id);
                        Ok(())
                    }
                    None => {
                        warn!(
                            "Session {} evaluation unavailable; staying in interview",
                            state.session.id
                        );
                        Err(CoachError::EvaluationUnavailable)
                    }
                }
            });
            state.in_flight = Some(InFlight {
                call: PendingCall::Evaluation,
                handle: task.abort_handle(),
            });
            task
        };

        join_call(task).await?;
        Ok(self.view())
    }

    /// Returns to setup from any step, cancelling the clock and any in-flight call.
    pub fn reset(&self) -> SimulationView {
        let mut state = self.inner.lock();
        state.epoch += 1;
        state.cancel_all();
        state.session.reset(self.catalog.default_config.clone());
        info!("Session {} reset to setup", state.session.id);
        self.render(&state)
    }

    /// Cancels background work without touching the session. Also runs on drop.
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        state.epoch += 1;
        state.cancel_all();
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn join_call(task: JoinHandle<Result<(), CoachError>>) -> Result<(), CoachError> {
    match task.await {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => Err(CoachError::Cancelled),
        Err(e) => Err(CoachError::Internal(anyhow::anyhow!(
            "gateway task failed: {e}"
        ))),
    }
}
