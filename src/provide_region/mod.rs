use crate::{Context, Result};
use std::fmt::Debug;

/// ProvideRegion resolves the signing region from one source.
///
/// Resolvers compose into ordered chains: the first `Some` wins, errors and
/// `None` fall through to the next resolver.
#[async_trait::async_trait]
pub trait ProvideRegion: Debug + Send + Sync + 'static {
    /// Resolve the region, returning `Ok(None)` when this source has no answer.
    async fn provide_region(&self, ctx: &Context) -> Result<Option<String>>;
}

mod r#static;
pub use r#static::StaticRegionProvider;

mod env;
pub use env::EnvRegionProvider;

mod profile;
pub use profile::ProfileRegionProvider;

mod chain;
pub use chain::ProvideRegionChain;

mod default;
pub use default::DefaultRegionProvider;
