//! Campaign guide loading from JSON files.

use std::path::Path;

use guidekeeper_domain::{CampaignGuide, DomainError, GuideDocument};

#[derive(Debug, thiserror::Error)]
pub enum GuideLoadError {
    #[error("Failed to read guide {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed guide JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid guide: {0}")]
    Invalid(#[from] DomainError),
}

/// Reads and validates campaign guides.
pub struct GuideLoader;

impl GuideLoader {
    pub async fn load_file(path: &Path) -> Result<CampaignGuide, GuideLoadError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| GuideLoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let guide = Self::parse(&json)?;
        tracing::info!(
            guide_id = %guide.id(),
            version = guide.version(),
            scenarios = guide.scenarios().len(),
            log_entries = guide.catalog().len(),
            path = %path.display(),
            "Loaded campaign guide"
        );
        Ok(guide)
    }

    /// Parse and validate a guide document.
    ///
    /// Unclassifiable conditions are logged but do not fail the load.
    pub fn parse(json: &str) -> Result<CampaignGuide, GuideLoadError> {
        let document: GuideDocument = serde_json::from_str(json)?;
        let guide = CampaignGuide::from_document(document)?;
        for (scenario, step, shape) in guide.unsupported_conditions() {
            tracing::warn!(
                guide_id = %guide.id(),
                scenario = %scenario,
                step = %step,
                shape = %shape,
                "Unsupported branch condition, step will render a placeholder"
            );
        }
        Ok(guide)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const GUIDE: &str = r#"{
        "id": "zealot", "name": "Night of the Zealot",
        "scenarios": [{"id": "the_gathering", "name": "The Gathering", "start": "a",
            "steps": [{"id": "a", "resolution": "R1"}]}]
    }"#;

    #[tokio::test]
    async fn loads_guide_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(GUIDE.as_bytes()).expect("write guide");

        let guide = GuideLoader::load_file(file.path()).await.expect("load");
        assert_eq!(guide.id(), "zealot");
        assert!(guide.scenario("the_gathering").is_some());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GuideLoader::load_file(&dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuideLoadError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            GuideLoader::parse("{not json").unwrap_err(),
            GuideLoadError::Json(_)
        ));
    }

    #[test]
    fn dangling_step_reference_is_invalid() {
        let err = GuideLoader::parse(
            r#"{"id":"g","name":"G","scenarios":[{"id":"s","name":"S","start":"a",
                "steps":[{"id":"a","next":"nowhere"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GuideLoadError::Invalid(DomainError::Validation(_))));
    }
}
