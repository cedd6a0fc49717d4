//! Application state and composition.

use std::sync::Arc;

use guidekeeper_domain::CampaignGuide;

use crate::entities::Campaigns;
use crate::infrastructure::{
    clock::SystemClock,
    config::{AppConfig, StoreKind},
    persistence::{InMemoryCampaignRepo, SqliteCampaignRepo},
    ports::{CampaignRepo, ClockPort, RepoError},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the loaded guide, the campaign store and all use cases.
pub struct App {
    pub guide: Arc<CampaignGuide>,
    pub campaigns: Arc<Campaigns>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub create_campaign: use_cases::CreateCampaign,
    pub delete_campaign: use_cases::DeleteCampaign,
    pub play: use_cases::PlayScenario,
    pub chaos_bag: use_cases::UpdateChaosBag,
    pub decks: use_cases::ManageDecks,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepo>,
        guide: Arc<CampaignGuide>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let campaigns = Arc::new(Campaigns::new(campaign_repo));

        let use_cases = UseCases {
            create_campaign: use_cases::CreateCampaign::new(campaigns.clone(), clock.clone()),
            delete_campaign: use_cases::DeleteCampaign::new(campaigns.clone()),
            play: use_cases::PlayScenario::new(campaigns.clone(), guide.clone(), clock.clone()),
            chaos_bag: use_cases::UpdateChaosBag::new(campaigns.clone(), clock.clone()),
            decks: use_cases::ManageDecks::new(campaigns.clone(), clock),
        };

        Self {
            guide,
            campaigns,
            use_cases,
        }
    }

    /// Open the configured store and wire the app with the system clock.
    pub async fn from_config(config: &AppConfig, guide: CampaignGuide) -> Result<Self, RepoError> {
        let repo: Arc<dyn CampaignRepo> = match config.store {
            StoreKind::Sqlite => Arc::new(SqliteCampaignRepo::new(&config.db_path).await?),
            StoreKind::Memory => Arc::new(InMemoryCampaignRepo::new()),
        };
        tracing::info!(store = ?config.store, "Campaign store ready");

        Ok(Self::new(repo, Arc::new(guide), Arc::new(SystemClock::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::DEFAULT_STEP_LIMIT;
    use crate::test_fixtures::load_guide;

    #[tokio::test]
    async fn memory_app_creates_and_plays_campaign() {
        let config = AppConfig {
            store: StoreKind::Memory,
            db_path: String::new(),
            guide_path: None,
            step_limit: DEFAULT_STEP_LIMIT,
        };
        let app = App::from_config(&config, load_guide("guides/night_of_the_zealot.json"))
            .await
            .unwrap();

        let campaign = app
            .use_cases
            .create_campaign
            .execute("Zealot run", app.guide.id())
            .await
            .unwrap();
        let playthrough = app
            .use_cases
            .play
            .play(campaign.id(), "the_gathering", config.step_limit)
            .await
            .unwrap();

        assert_eq!(playthrough.resolution(), Some("R1"));
        assert_eq!(app.campaigns.list().await.unwrap().len(), 1);
    }
}
