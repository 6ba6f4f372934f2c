//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use url::Url;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, FolioConfig};
use crate::context::{Context, CONFIG_NAMES};
use crate::site::Site;

pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { site, force } => init_config(&site, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.section("site");
    ctx.output.kv("name", &config.site.name);
    ctx.output.kv("locales", &config.site.locales.join(", "));

    ctx.output.section("cms");
    ctx.output.kv("api_base", &config.cms.api_base);
    ctx.output.kv("timeout_ms", &config.cms.timeout_ms.to_string());
    ctx.output.kv("retries", &config.cms.retries.to_string());

    ctx.output.section("build");
    ctx.output.kv("manifest", &config.build.manifest);
    ctx.output.kv("asset_base", &config.build.asset_base);

    ctx.output.section("serve");
    ctx.output.kv("addr", &config.serve.addr);

    ctx.output.section("upload");
    ctx.output.kv("dir", &config.upload.dir);

    if !config.environments.is_empty() {
        ctx.output.header("Environments");
        let mut names: Vec<&String> = config.environments.keys().collect();
        names.sort();
        for name in names {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn init_config(site: &str, force: bool, ctx: &Context) -> Result<()> {
    let site: Site = site.parse()?;
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(site.name()))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config, ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}

/// Errors and warnings for one configuration.
fn check(config: &FolioConfig, ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Err(e) = config.site.name.parse::<Site>() {
        errors.push(format!("site.name: {}", e));
    }
    if config.site.locales.is_empty() {
        warnings.push("site.locales is empty; every URL falls back to \"en\"".to_string());
    }

    match Url::parse(&config.cms.api_base) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(format!("cms.api_base has unsupported scheme {}", url.scheme())),
        Err(e) => errors.push(format!("cms.api_base is not a URL: {}", e)),
    }
    if config.cms.timeout_ms == 0 {
        errors.push("cms.timeout_ms must be greater than 0".to_string());
    }

    if !ctx.resolve_path(&config.build.manifest).is_file() {
        warnings.push(format!(
            "build.manifest {} does not exist yet; build the client first",
            config.build.manifest
        ));
    }

    if config.serve.addr.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!("serve.addr {} is not a socket address", config.serve.addr));
    }

    if config.upload.dir.is_empty() {
        errors.push("upload.dir is required".to_string());
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::output::Output;

    fn context(config: FolioConfig, cwd: PathBuf) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd,
            config_path: None,
        }
    }

    #[test]
    fn test_defaults_only_warn_about_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(FolioConfig::default(), dir.path().to_path_buf());
        let (errors, warnings) = check(&ctx.config, &ctx);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("build.manifest"));
    }

    #[test]
    fn test_invalid_values_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FolioConfig::default();
        config.site.name = "helper-center".to_string();
        config.cms.api_base = "ftp://cms".to_string();
        config.cms.timeout_ms = 0;
        config.serve.addr = "localhost".to_string();
        let ctx = context(config, dir.path().to_path_buf());

        let (errors, _) = check(&ctx.config, &ctx);
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(validate_config(&ctx).is_err());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(FolioConfig::default(), dir.path().to_path_buf());

        init_config("blogs", false, &ctx).unwrap();
        let written = FolioConfig::load(&dir.path().join("folio.toml").to_string_lossy()).unwrap();
        assert_eq!(written.site.name, "blogs");

        assert!(init_config("blogs", false, &ctx).is_err());
        assert!(init_config("academy", true, &ctx).is_ok());
        assert!(init_config("helper-center", true, &ctx).is_err());
    }
}
