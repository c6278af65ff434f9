use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply the listings of a session
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Load the full listing set for one session
    async fn load(&self) -> Result<Vec<Listing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
