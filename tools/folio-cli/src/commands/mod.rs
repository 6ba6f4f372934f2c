//! CLI command implementations.

pub mod config;
pub mod render;
pub mod serve;
pub mod upload;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::pipeline::Pipeline;

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Page URL, e.g. `/en/glossary`.
    pub url: String,

    /// Template name; looked up in the route table when omitted.
    #[arg(short, long)]
    pub template: Option<String>,

    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Page URL, e.g. `/en/glossary`.
    pub url: String,

    /// Template name; looked up in the route table when omitted.
    #[arg(short, long)]
    pub template: Option<String>,
}

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address (default: `[serve] addr`).
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a default folio.toml in the current directory
    Init {
        /// Sub-site to configure.
        #[arg(long, default_value = "academy")]
        site: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Check the configuration for errors
    Validate,
}

/// The given template name, or the one the pipeline resolves for `url`.
pub(crate) async fn template_name(
    pipeline: &Pipeline,
    url: &str,
    given: Option<String>,
) -> Result<String> {
    if let Some(name) = given {
        return Ok(name);
    }
    pipeline
        .template_for(url)
        .await?
        .with_context(|| format!("templateName not found for {}", url))
}
