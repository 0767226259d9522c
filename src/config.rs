//! Service name and region resolution.

use crate::constants::{AWS_NEPTUNE_SERVICE_NAME, NEPTUNE_DB_SERVICE};
use crate::provide_region::{DefaultRegionProvider, ProvideRegion};
use crate::{Context, Error, Result};

/// Resolve the signing service name.
///
/// Precedence: explicit value, then the `AWS_NEPTUNE_SERVICE_NAME`
/// environment variable, then the `neptune-db` default.
pub fn resolve_service_name(ctx: &Context, explicit: Option<&str>) -> String {
    explicit
        .map(|v| v.to_string())
        .or_else(|| ctx.env_var(AWS_NEPTUNE_SERVICE_NAME))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NEPTUNE_DB_SERVICE.to_string())
}

/// Resolve the signing region.
///
/// Precedence: explicit value, then the default resolver chain (environment
/// variables, shared config file). An unresolved region is a fatal
/// configuration error; nothing is sent on this path.
pub async fn resolve_region(ctx: &Context, explicit: Option<&str>) -> Result<String> {
    if let Some(region) = explicit.filter(|v| !v.is_empty()) {
        return Ok(region.to_string());
    }

    DefaultRegionProvider::new()
        .provide_region(ctx)
        .await?
        .ok_or_else(|| {
            Error::config_invalid(
                "signing region is not configured: set it explicitly, via AWS_REGION, or in the shared config file",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AWS_REGION;
    use crate::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_service_name_explicit_wins() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(
                AWS_NEPTUNE_SERVICE_NAME.to_string(),
                "neptune-graph".to_string(),
            )]),
        });

        assert_eq!(resolve_service_name(&ctx, Some("neptune-db")), "neptune-db");
        assert_eq!(resolve_service_name(&ctx, None), "neptune-graph");
    }

    #[tokio::test]
    async fn test_service_name_default() {
        let ctx = Context::new().with_env(StaticEnv::default());
        assert_eq!(resolve_service_name(&ctx, None), "neptune-db");
    }

    #[tokio::test]
    async fn test_region_explicit_wins() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(AWS_REGION.to_string(), "eu-west-1".to_string())]),
        });

        let region = resolve_region(&ctx, Some("us-east-1")).await.unwrap();
        assert_eq!(region, "us-east-1");
    }

    #[tokio::test]
    async fn test_region_unresolved_is_config_error() {
        let ctx = Context::new().with_env(StaticEnv::default());

        let err = resolve_region(&ctx, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
