use super::ProvideRegion;
use crate::{Context, Result};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// A chain of region resolvers tried in order.
pub struct ProvideRegionChain {
    providers: Vec<Box<dyn ProvideRegion>>,
}

impl ProvideRegionChain {
    /// Create a new empty region resolver chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a region resolver to the chain.
    pub fn push(mut self, provider: impl ProvideRegion + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl Default for ProvideRegionChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProvideRegionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideRegionChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

#[async_trait]
impl ProvideRegion for ProvideRegionChain {
    async fn provide_region(&self, ctx: &Context) -> Result<Option<String>> {
        for provider in &self.providers {
            log::debug!("trying region resolver: {provider:?}");

            match provider.provide_region(ctx).await {
                Ok(Some(region)) => {
                    log::debug!("resolved region {region} from resolver: {provider:?}");
                    return Ok(Some(region));
                }
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("region resolver {provider:?} failed: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}
