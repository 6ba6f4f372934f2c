//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use folio_data::CmsClient;

use crate::config::FolioConfig;
use crate::output::Output;
use crate::pipeline::Pipeline;
use crate::site::Site;

/// Config file names searched for, in order, from the cwd upward.
pub const CONFIG_NAMES: [&str; 3] = ["folio.toml", ".folio.toml", "folio.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: FolioConfig,
    pub output: Output,
    pub cwd: PathBuf,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load the config from `config_path`, or the nearest config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => FolioConfig::load(&path.to_string_lossy())?,
            None => FolioConfig::default(),
        };
        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    pub fn site(&self) -> Result<Site> {
        self.config.site.name.parse()
    }

    /// Build the configured site's pipeline against the content backend.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let site = self.site()?;
        let client = CmsClient::with_policy(&self.config.cms.api_base, self.config.cms.fetch_policy())
            .context("Failed to create content backend client")?;
        tracing::debug!(site = %site, api_base = %client.api_base(), "building pipeline");

        let pipeline = Pipeline::new(
            site,
            &self.config.site.locales,
            self.resolve_path(&self.config.build.manifest),
            &self.config.build.asset_base,
            Arc::new(client),
        )
        .with_context(|| format!("Invalid template registry for site {}", site))?;
        Ok(pipeline)
    }
}

/// Find the nearest config file in `start` or its ancestors.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
