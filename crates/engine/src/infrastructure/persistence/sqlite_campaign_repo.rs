//! SQLite-backed campaign storage.

use std::path::Path;

use async_trait::async_trait;
use guidekeeper_domain::{Campaign, CampaignId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CampaignRepo, RepoError};

/// SQLite implementation storing one JSON snapshot per campaign.
pub struct SqliteCampaignRepo {
    pool: SqlitePool,
}

impl SqliteCampaignRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RepoError::database("campaigns.open", e))?;
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("campaigns.open", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS campaigns (
                id TEXT PRIMARY KEY,
                guide_id TEXT NOT NULL,
                snapshot_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("campaigns.open", e))?;

        tracing::debug!(db_path = %db_path, "Opened campaign store");
        Ok(Self { pool })
    }

    fn decode(json: &str) -> Result<Campaign, RepoError> {
        serde_json::from_str(json).map_err(RepoError::serialization)
    }
}

#[async_trait]
impl CampaignRepo for SqliteCampaignRepo {
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError> {
        let row = sqlx::query("SELECT snapshot_json FROM campaigns WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("campaigns.get", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("snapshot_json");
                Ok(Some(Self::decode(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), RepoError> {
        let json = serde_json::to_string(campaign).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (id, guide_id, snapshot_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                guide_id = excluded.guide_id,
                snapshot_json = excluded.snapshot_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(campaign.id().to_string())
        .bind(campaign.guide_id())
        .bind(json)
        .bind(campaign.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("campaigns.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: CampaignId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("campaigns.delete", e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campaign>, RepoError> {
        let rows = sqlx::query("SELECT snapshot_json FROM campaigns ORDER BY updated_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("campaigns.list", e))?;

        rows.iter()
            .map(|row| {
                let json: String = row.get("snapshot_json");
                Self::decode(&json)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use guidekeeper_domain::{
        CampaignName, ChaosBag, ChaosTokenType, LogEffect, ScenarioId, ScenarioPosition,
        SectionName, StepId,
    };

    use super::*;

    fn campaign(name: &str, offset_minutes: i64) -> Campaign {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::minutes(offset_minutes);
        Campaign::new(CampaignName::new(name).unwrap(), "zealot", now)
    }

    async fn open(dir: &tempfile::TempDir) -> SqliteCampaignRepo {
        let db_path = dir.path().join("campaigns.db");
        SqliteCampaignRepo::new(&db_path.to_string_lossy())
            .await
            .expect("open store")
    }

    #[tokio::test]
    async fn snapshot_persists_across_restart() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let mut saved = campaign("Zealot run", 0);
        let later = saved.updated_at() + Duration::minutes(5);
        saved.apply_effect(
            &LogEffect::Increment {
                section: SectionName::new("cultists").unwrap(),
                delta: 2,
            },
            later,
        );
        saved.move_to(
            ScenarioPosition::new(
                ScenarioId::new("the_gathering").unwrap(),
                StepId::new("check_house").unwrap(),
            ),
            later,
        );
        saved.replace_chaos_bag(ChaosBag::with_tokens([(ChaosTokenType::Skull, 2)]), later);

        {
            let repo = open(&temp_dir).await;
            repo.save(&saved).await.expect("save");
        }

        let repo = open(&temp_dir).await;
        let loaded = repo.get(saved.id()).await.expect("get").expect("present");
        assert_eq!(loaded, saved);
        assert_eq!(loaded.log().count("cultists"), 2);
    }

    #[tokio::test]
    async fn save_upserts_by_id() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let repo = open(&temp_dir).await;
        let mut c = campaign("Zealot run", 0);
        repo.save(&c).await.expect("save");

        c.set_name(CampaignName::new("Renamed").unwrap(), c.updated_at() + Duration::minutes(1));
        repo.save(&c).await.expect("save again");

        let all = repo.list().await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name().as_str(), "Renamed");
    }

    #[tokio::test]
    async fn list_orders_by_most_recent_update() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let repo = open(&temp_dir).await;
        let older = campaign("Older", 0);
        let newer = campaign("Newer", 10);
        repo.save(&older).await.expect("save");
        repo.save(&newer).await.expect("save");

        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn delete_removes_snapshot() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let repo = open(&temp_dir).await;
        let c = campaign("Doomed", 0);
        repo.save(&c).await.expect("save");
        repo.delete(c.id()).await.expect("delete");
        assert!(repo.get(c.id()).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let db_path = temp_dir.path().join("nested").join("campaigns.db");
        let repo = SqliteCampaignRepo::new(&db_path.to_string_lossy())
            .await
            .expect("open store");
        assert!(repo.list().await.expect("list").is_empty());
    }
}
