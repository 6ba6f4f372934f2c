//! Render one page and store it under the upload directory.

use anyhow::Result;
use folio_render::{upload, FsUploader};

use super::{template_name, UploadArgs};
use crate::context::Context;

pub async fn run(args: UploadArgs, ctx: &Context) -> Result<()> {
    let pipeline = ctx.pipeline()?;
    let template = template_name(&pipeline, &args.url, args.template).await?;
    let html = pipeline.render(&args.url, &template).await?;

    let uploader = FsUploader::new(ctx.resolve_path(&ctx.config.upload.dir));
    let key = upload(pipeline.site().host(), &args.url, &html, &uploader).await?;
    let path = uploader.path_for(&key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "key": key,
            "templateName": template,
            "path": path,
        }));
    } else {
        ctx.output.success(&format!("Uploaded {}", key));
        ctx.output.kv("template", &template);
        ctx.output.kv("path", &path.display().to_string());
    }
    Ok(())
}
