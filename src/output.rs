use crate::models::Session;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub const LISTINGS_FILE: &str = "listings.json";
pub const PAGE_FILE: &str = "index.html";
pub const PREVIEW_FILE: &str = "preview.png";

/// Paths written for one session
#[derive(Debug, Clone)]
pub struct SessionFiles {
    pub listings: PathBuf,
    pub page: PathBuf,
}

/// Writes a session's listings and rendered page into an output directory
pub struct SessionWriter {
    dir: PathBuf,
}

impl SessionWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn write(&self, session: &Session, page_html: &str) -> Result<SessionFiles> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let listings = self.dir.join(LISTINGS_FILE);
        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&listings, json)
            .await
            .with_context(|| format!("Failed to write {}", listings.display()))?;
        info!("💾 Saved {} listings to {}", session.listings.len(), listings.display());

        let page = self.dir.join(PAGE_FILE);
        tokio::fs::write(&page, page_html)
            .await
            .with_context(|| format!("Failed to write {}", page.display()))?;
        info!("💾 Saved map page to {}", page.display());

        Ok(SessionFiles { listings, page })
    }
}
