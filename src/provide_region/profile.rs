use super::ProvideRegion;
use crate::constants::{AWS_CONFIG_FILE, AWS_PROFILE};
use crate::{Context, Error, Result};
use async_trait::async_trait;
use ini::Ini;
use log::debug;

/// ProfileRegionProvider loads the region from the shared config file.
///
/// The file is `~/.aws/config` (or the path in `AWS_CONFIG_FILE`), the
/// profile is taken from `AWS_PROFILE` (or `with_profile`), defaulting to
/// `default`.
#[derive(Debug)]
pub struct ProfileRegionProvider {
    profile: String,
    config_file: Option<String>,
}

impl Default for ProfileRegionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRegionProvider {
    /// Create a new ProfileRegionProvider with default settings.
    pub fn new() -> Self {
        Self {
            profile: "default".to_string(),
            config_file: None,
        }
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the path to the config file.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideRegion for ProfileRegionProvider {
    async fn provide_region(&self, ctx: &Context) -> Result<Option<String>> {
        let profile = ctx
            .env_var(AWS_PROFILE)
            .unwrap_or_else(|| self.profile.clone());

        let path = if let Some(path) = &self.config_file {
            path.clone()
        } else if let Some(path) = ctx.env_var(AWS_CONFIG_FILE) {
            path
        } else {
            "~/.aws/config".to_string()
        };

        let expanded_path = match ctx.expand_home_dir(&path) {
            Some(expanded) => expanded,
            None => {
                debug!("failed to expand homedir for path: {path}");
                return Ok(None);
            }
        };

        let content = match ctx.file_read(&expanded_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read config file {expanded_path}: {err:?}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&String::from_utf8_lossy(&content)).map_err(|e| {
            Error::config_invalid("failed to parse config file").with_source(anyhow::Error::new(e))
        })?;

        let section = match profile.as_str() {
            "default" => "default".to_string(),
            x => format!("profile {x}"),
        };

        let props = match conf.section(Some(&section)) {
            Some(props) => props,
            None => {
                debug!("section {profile} not found in config file");
                return Ok(None);
            }
        };

        Ok(props.get("region").map(|v| v.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AWS_PROFILE;
    use crate::{StaticEnv, StdFileRead};
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_region_from_config_file() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let tmp_dir = tempdir()?;
        let file_path = tmp_dir.path().join("config");
        let mut tmp_file = File::create(&file_path)?;
        writeln!(tmp_file, "[default]")?;
        writeln!(tmp_file, "region = us-east-1")?;
        writeln!(tmp_file)?;
        writeln!(tmp_file, "[profile graph]")?;
        writeln!(tmp_file, "region = ap-southeast-2")?;

        let ctx = Context::new()
            .with_file_read(StdFileRead)
            .with_env(StaticEnv::default());

        let provider =
            ProfileRegionProvider::new().with_config_file(file_path.to_str().unwrap());
        let region = provider.provide_region(&ctx).await?;
        assert_eq!(region.as_deref(), Some("us-east-1"));

        let provider = ProfileRegionProvider::new()
            .with_profile("graph")
            .with_config_file(file_path.to_str().unwrap());
        let region = provider.provide_region(&ctx).await?;
        assert_eq!(region.as_deref(), Some("ap-southeast-2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_region_profile_env_override() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let file_path = tmp_dir.path().join("config");
        let mut tmp_file = File::create(&file_path)?;
        writeln!(tmp_file, "[default]")?;
        writeln!(tmp_file, "region = us-east-1")?;
        writeln!(tmp_file)?;
        writeln!(tmp_file, "[profile graph]")?;
        writeln!(tmp_file, "region = ap-southeast-2")?;

        let ctx = Context::new().with_file_read(StdFileRead).with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(AWS_PROFILE.to_string(), "graph".to_string())]),
        });

        let provider =
            ProfileRegionProvider::new().with_config_file(file_path.to_str().unwrap());
        let region = provider.provide_region(&ctx).await?;
        assert_eq!(region.as_deref(), Some("ap-southeast-2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_region_missing_config_file() -> anyhow::Result<()> {
        let ctx = Context::new()
            .with_file_read(StdFileRead)
            .with_env(StaticEnv::default());

        let provider = ProfileRegionProvider::new().with_config_file("/non/existent/path");
        let region = provider.provide_region(&ctx).await?;
        assert!(region.is_none());

        Ok(())
    }
}
