use serde::Serialize;

/// Promotional content shown when a free user hits a locked section or the
/// session limit. Presenting it has no effect on the user's tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOffer {
    pub plan_name: String,
    pub tagline: String,
    pub monthly_price_usd: u32,
    pub features: Vec<String>,
    pub guarantee: String,
}

impl UpgradeOffer {
    pub fn standard() -> Self {
        Self {
            plan_name: "LevelUp Pro".to_string(),
            tagline: "The ultimate toolkit for aspiring analysts and consultants. \
                Outperform the competition with AI-driven precision."
                .to_string(),
            monthly_price_usd: 29,
            features: vec![
                "Unlimited AI Mock Interviews".to_string(),
                "Deep Resume Keyword Injection".to_string(),
                "Premium MBB & Bulge Bracket Sets".to_string(),
                "Private Community Mastermind".to_string(),
            ],
            guarantee: "7-day money back guarantee. Cancel anytime.".to_string(),
        }
    }
}
