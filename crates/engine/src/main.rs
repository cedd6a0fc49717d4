//! Guidekeeper - plays a campaign guide scenario from the command line.
//!
//! Usage: `guidekeeper <scenario-id> [campaign-id]`
//!
//! Without a campaign id a new campaign is created for the configured guide.

use anyhow::{bail, Context};
use guidekeeper_domain::{CampaignId, PlaythroughEnd, Transition};
use guidekeeper_engine::infrastructure::{config::AppConfig, guide_loader::GuideLoader};
use guidekeeper_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guidekeeper_engine=debug,guidekeeper_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(scenario_id) = args.next() else {
        bail!("usage: guidekeeper <scenario-id> [campaign-id]");
    };
    let campaign_id = args
        .next()
        .map(|s| s.parse::<CampaignId>())
        .transpose()
        .context("campaign id must be a UUID")?;

    let config = AppConfig::from_env()?;
    let guide_path = config.require_guide_path()?;
    let guide = GuideLoader::load_file(guide_path)
        .await
        .with_context(|| format!("loading guide {}", guide_path.display()))?;

    let app = App::from_config(&config, guide)
        .await
        .context("opening campaign store")?;

    let campaign_id = match campaign_id {
        Some(id) => id,
        None => {
            let name = format!("{} campaign", app.guide.name());
            app.use_cases
                .create_campaign
                .execute(&name, app.guide.id())
                .await?
                .id()
        }
    };

    tracing::info!(
        campaign_id = %campaign_id,
        scenario = %scenario_id,
        "Playing scenario"
    );
    let playthrough = app
        .use_cases
        .play
        .play(campaign_id, &scenario_id, config.step_limit)
        .await?;

    match &playthrough.end {
        PlaythroughEnd::Stopped(Transition::Complete { resolution }) => tracing::info!(
            campaign_id = %campaign_id,
            steps = playthrough.visited.len(),
            resolution = resolution.as_deref().unwrap_or("none"),
            "Scenario complete"
        ),
        PlaythroughEnd::Stopped(other) => tracing::warn!(
            campaign_id = %campaign_id,
            steps = playthrough.visited.len(),
            stopped = ?other,
            "Scenario stopped before a resolution"
        ),
        PlaythroughEnd::StepLimitReached => tracing::warn!(
            campaign_id = %campaign_id,
            step_limit = config.step_limit,
            "Scenario did not finish within the step limit"
        ),
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
