//! CLI configuration (`folio.toml`).

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_data::{FetchPolicy, RetryPolicy, TimeoutConfig};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub cms: CmsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    /// Named overrides selected with `--env`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl FolioConfig {
    /// Load config from a `.toml` or `.json` file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// The config with one environment's sections replacing the base ones.
    ///
    /// An unknown environment name is an error.
    pub fn for_environment(&self, env: &str) -> Result<FolioConfig> {
        let overrides = self
            .environments
            .get(env)
            .with_context(|| format!("Unknown environment: {}", env))?;

        let mut config = self.clone();
        if let Some(site) = &overrides.site {
            config.site = site.clone();
        }
        if let Some(cms) = &overrides.cms {
            config.cms = cms.clone();
        }
        if let Some(build) = &overrides.build {
            config.build = build.clone();
        }
        if let Some(serve) = &overrides.serve {
            config.serve = serve.clone();
        }
        if let Some(upload) = &overrides.upload {
            config.upload = upload.clone();
        }
        Ok(config)
    }
}

/// Which sub-site to render and its locales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// `blogs` or `academy`.
    #[serde(default = "default_site")]
    pub name: String,

    /// Locale prefixes recognised in URLs; the first is the default.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

fn default_site() -> String {
    "academy".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site(),
            locales: default_locales(),
        }
    }
}

/// Content backend access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Total deadline per request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a failed request; server errors, timeouts and
    /// connection failures only.
    #[serde(default)]
    pub retries: u32,
}

fn default_api_base() -> String {
    "http://localhost:1337/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_ms: default_timeout_ms(),
            retries: 0,
        }
    }
}

impl CmsConfig {
    pub fn fetch_policy(&self) -> FetchPolicy {
        let timeout = TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms));
        let retry = if self.retries == 0 {
            RetryPolicy::none()
        } else {
            RetryPolicy::new(self.retries)
        };
        FetchPolicy::new(timeout, retry)
    }
}

/// Client build output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build manifest the client entry script is read from.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Base URL the manifest's file paths are served under.
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
}

fn default_manifest() -> String {
    "dist/client/.vite/manifest.json".to_string()
}

fn default_asset_base() -> String {
    "/".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            asset_base: default_asset_base(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory rendered pages are written below, one folder per host.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
}

fn default_upload_dir() -> String {
    "dist/pages".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
        }
    }
}

/// Environment-specific section overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms: Option<CmsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serve: Option<ServeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConfig>,
}

/// Generate a default `folio.toml`.
pub fn generate_default_config(site: &str) -> String {
    format!(
        r#"# Folio sub-site configuration

[site]
name = "{site}"
locales = ["en"]

[cms]
api_base = "http://localhost:1337/api"
timeout_ms = 10000
retries = 0

[build]
manifest = "dist/client/.vite/manifest.json"
asset_base = "/"

[serve]
addr = "127.0.0.1:3000"

[upload]
dir = "dist/pages"

[environments.production.cms]
api_base = "https://cms.rubydex.com/api"
timeout_ms = 5000
retries = 2
"#,
        site = site
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = FolioConfig::parse("folio.toml", "").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.site.name, "academy");
        assert_eq!(config.site.locales, vec!["en"]);
        assert_eq!(config.serve.addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = FolioConfig::parse("folio.toml", &generate_default_config("blogs")).unwrap();
        assert_eq!(config.site.name, "blogs");
        assert_eq!(config.cms.retries, 0);
        assert!(config.environments.contains_key("production"));
    }

    #[test]
    fn test_for_environment_replaces_sections() {
        let config = FolioConfig::parse("folio.toml", &generate_default_config("academy")).unwrap();
        let production = config.for_environment("production").unwrap();
        assert_eq!(production.cms.api_base, "https://cms.rubydex.com/api");
        assert_eq!(production.cms.retries, 2);
        // Sections without an override stay as they were.
        assert_eq!(production.build, config.build);
        assert_eq!(production.site.name, "academy");

        assert!(config.for_environment("staging").is_err());
    }

    #[test]
    fn test_json_config() {
        let config = FolioConfig::parse(
            "folio.json",
            r#"{"site": {"name": "blogs"}, "upload": {"dir": "out"}}"#,
        )
        .unwrap();
        assert_eq!(config.site.name, "blogs");
        assert_eq!(config.site.locales, vec!["en"]);
        assert_eq!(config.upload.dir, "out");
    }

    #[test]
    fn test_fetch_policy() {
        let cms = CmsConfig {
            timeout_ms: 4000,
            retries: 0,
            ..CmsConfig::default()
        };
        let policy = cms.fetch_policy();
        assert_eq!(policy.timeout.total, Duration::from_secs(4));
        assert_eq!(policy.timeout.connect, Duration::from_secs(1));
        assert_eq!(policy.retry, RetryPolicy::none());

        let cms = CmsConfig {
            retries: 3,
            ..CmsConfig::default()
        };
        assert_eq!(cms.fetch_policy().retry.max_retries, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[serve]\naddr = \"0.0.0.0:8080\"\n").unwrap();

        let config = FolioConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.serve.addr, "0.0.0.0:8080");
        assert!(FolioConfig::load("/definitely/missing/folio.toml").is_err());
    }
}
