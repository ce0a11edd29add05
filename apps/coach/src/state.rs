use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::gateway::{AiGateway, GatewayModels};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::resume::controller::ResumeScanController;
use crate::simulation::catalog::SetupCatalog;
use crate::simulation::controller::SimulationController;
use crate::tier::offer::UpgradeOffer;
use crate::tier::quota::QuotaTracker;
use crate::tier::UserTier;

/// Root of the coach. Holds what every flow controller shares and builds
/// controllers on demand; each controller owns its own session state.
#[derive(Clone)]
pub struct Coach {
    gateway: AiGateway,
    catalog: Arc<SetupCatalog>,
    tier: UserTier,
    quota: QuotaTracker,
}

impl Coach {
    /// Wires the production Gemini client from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = LlmClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.llm_timeout,
        )?;
        info!(
            "LLM client initialized (question model: {}, evaluation model: {})",
            config.question_model, config.evaluation_model
        );

        let models = GatewayModels {
            question: config.question_model.clone(),
            evaluation: config.evaluation_model.clone(),
        };
        Ok(Self::new(
            Arc::new(llm),
            models,
            SetupCatalog::standard(),
            config.user_tier,
            config.free_simulation_quota,
        ))
    }

    pub fn new(
        llm: Arc<dyn TextGenerator>,
        models: GatewayModels,
        catalog: SetupCatalog,
        tier: UserTier,
        free_simulation_quota: u32,
    ) -> Self {
        info!("Coach ready for a {tier} user");
        Self {
            gateway: AiGateway::new(llm, models),
            catalog: Arc::new(catalog),
            tier,
            quota: QuotaTracker::for_tier(tier, free_simulation_quota),
        }
    }

    pub fn tier(&self) -> UserTier {
        self.tier
    }

    pub fn catalog(&self) -> &SetupCatalog {
        &self.catalog
    }

    /// `None` means unlimited.
    pub fn simulations_left(&self) -> Option<u32> {
        self.quota.remaining()
    }

    pub fn new_simulation(&self) -> SimulationController {
        SimulationController::new(
            self.gateway.clone(),
            Arc::clone(&self.catalog),
            self.quota.clone(),
            self.tier,
        )
    }

    pub fn new_resume_scan(&self) -> ResumeScanController {
        ResumeScanController::new(
            self.gateway.clone(),
            self.catalog.default_resume_role.clone(),
            self.tier,
        )
    }

    /// The "upgrade" action. Only presents the offer; the tier stays as it is.
    pub fn upgrade_offer(&self) -> UpgradeOffer {
        info!("Upgrade offer shown to a {} user", self.tier);
        UpgradeOffer::standard()
    }
}
