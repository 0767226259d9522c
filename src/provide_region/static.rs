use super::ProvideRegion;
use crate::{Context, Result};
use async_trait::async_trait;

/// StaticRegionProvider returns a fixed region.
///
/// This is the "explicit parameter" step of the resolution chain.
#[derive(Debug, Clone)]
pub struct StaticRegionProvider {
    region: String,
}

impl StaticRegionProvider {
    /// Create a new StaticRegionProvider.
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl ProvideRegion for StaticRegionProvider {
    async fn provide_region(&self, _: &Context) -> Result<Option<String>> {
        Ok(Some(self.region.clone()))
    }
}
