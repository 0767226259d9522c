use super::ProvideRegion;
use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION};
use crate::{Context, Result};
use async_trait::async_trait;

/// EnvRegionProvider loads the region from environment variables.
///
/// `AWS_REGION` is consulted first, then `AWS_DEFAULT_REGION`.
#[derive(Debug, Default, Clone)]
pub struct EnvRegionProvider;

impl EnvRegionProvider {
    /// Create a new EnvRegionProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideRegion for EnvRegionProvider {
    async fn provide_region(&self, ctx: &Context) -> Result<Option<String>> {
        Ok(ctx
            .env_var(AWS_REGION)
            .or_else(|| ctx.env_var(AWS_DEFAULT_REGION))
            .filter(|v| !v.is_empty()))
    }
}
