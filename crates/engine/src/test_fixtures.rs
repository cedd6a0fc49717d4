//! Test fixtures loader for guide files under `test_data/`.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use guidekeeper_domain::CampaignGuide;

use crate::infrastructure::{clock::FixedClock, guide_loader::GuideLoader, ports::ClockPort};

/// Path of a fixture under `test_data/`.
pub fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

/// Load and validate a guide fixture.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or is not a valid guide.
pub fn load_guide(path: &str) -> CampaignGuide {
    let fixture_path = fixture_path(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    GuideLoader::parse(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

/// Night of the Zealot guide with two scenarios.
///
/// - `the_gathering`: linear intro, then branches on a text entry and a
///   counter with an `otherwise` fallback
/// - `the_midnight_masks`: branches on a card entry, then on an unsupported
///   condition followed by a card-membership condition
pub fn zealot_guide() -> Arc<CampaignGuide> {
    Arc::new(load_guide("guides/night_of_the_zealot.json"))
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn fixed_clock() -> Arc<dyn ClockPort> {
    Arc::new(FixedClock(fixed_now()))
}
