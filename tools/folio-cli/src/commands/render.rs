//! Render one page to HTML.

use anyhow::{Context as _, Result};

use super::{template_name, RenderArgs};
use crate::context::Context;

pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let pipeline = ctx.pipeline()?;
    let template = template_name(&pipeline, &args.url, args.template).await?;
    ctx.output.debug(&format!("Rendering {} with {}", args.url, template));

    let html = pipeline.render(&args.url, &template).await?;

    let Some(out) = args.out else {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({
                "url": args.url,
                "templateName": template,
                "html": html,
            }));
        } else {
            println!("{}", html);
        }
        return Ok(());
    };

    let path = ctx.resolve_path(&out);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&path, &html)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "url": args.url,
            "templateName": template,
            "path": path,
            "bytes": html.len(),
        }));
    } else {
        ctx.output
            .success(&format!("Rendered {} ({}) to {}", args.url, template, path.display()));
    }
    Ok(())
}
