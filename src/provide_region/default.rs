use super::{EnvRegionProvider, ProfileRegionProvider, ProvideRegion, ProvideRegionChain};
use crate::{Context, Result};
use async_trait::async_trait;

/// DefaultRegionProvider resolves the region via the default chain.
///
/// Resolution order:
///
/// 1. `AWS_REGION` / `AWS_DEFAULT_REGION` environment variables
/// 2. Shared config file (`~/.aws/config` or `AWS_CONFIG_FILE`)
///
/// Instance-metadata discovery is not part of this chain; deployments that
/// rely on it should resolve the region themselves and pass it explicitly.
#[derive(Debug)]
pub struct DefaultRegionProvider {
    chain: ProvideRegionChain,
}

impl Default for DefaultRegionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultRegionProvider {
    /// Create a new `DefaultRegionProvider` instance.
    pub fn new() -> Self {
        let chain = ProvideRegionChain::new()
            .push(EnvRegionProvider::new())
            .push(ProfileRegionProvider::new());

        Self { chain }
    }
}

#[async_trait]
impl ProvideRegion for DefaultRegionProvider {
    async fn provide_region(&self, ctx: &Context) -> Result<Option<String>> {
        self.chain.provide_region(ctx).await
    }
}
