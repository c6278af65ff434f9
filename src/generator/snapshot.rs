use crate::generator::traits::ListingSource;
use crate::models::{Listing, Session};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Replays the listings of a previously exported session
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for SnapshotSource {
    async fn load(&self) -> Result<Vec<Listing>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        let session: Session = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))?;

        info!(
            "Loaded {} listings from {} (generated {})",
            session.listings.len(),
            self.path.display(),
            session.generated_at
        );
        Ok(session.listings)
    }

    fn source_name(&self) -> &'static str {
        "snapshot"
    }
}
