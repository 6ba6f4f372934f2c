//! Storage of rendered documents.

use std::path::{Component as PathComponent, Path, PathBuf};

use async_trait::async_trait;

/// Content type of rendered documents.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Upload failures.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid upload key: {0}")]
    InvalidKey(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload backend error: {0}")]
    Backend(String),
}

/// Object storage for rendered pages.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError>;
}

/// Storage key of a page: the site host followed by the URL.
pub fn upload_key(site_host: &str, url: &str) -> String {
    format!("{site_host}{url}")
}

/// Store a rendered document under `{site_host}{url}` and return the key.
///
/// Failures are returned as-is; nothing is retried.
pub async fn upload(
    site_host: &str,
    url: &str,
    html: &str,
    uploader: &dyn Uploader,
) -> Result<String, UploadError> {
    let key = upload_key(site_host, url);
    uploader.put(&key, html.as_bytes(), HTML_CONTENT_TYPE).await?;
    tracing::info!(key = %key, bytes = html.len(), "uploaded page");
    Ok(key)
}

/// Uploader writing each key as a file below a root directory.
///
/// Page keys are stored as `index.html` inside a directory named after the
/// key, so `/en` and `/en/defi` can coexist. Keys whose last segment has an
/// extension are stored as-is.
#[derive(Debug, Clone)]
pub struct FsUploader {
    root: PathBuf,
}

impl FsUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a key is stored at.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, UploadError> {
        let relative = Path::new(key.trim_start_matches('/'));
        let safe = relative
            .components()
            .all(|c| matches!(c, PathComponent::Normal(_)));
        if key.is_empty() || !safe {
            return Err(UploadError::InvalidKey(key.to_string()));
        }
        let mut path = self.root.join(relative);
        let has_extension = !key.ends_with('/')
            && relative
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));
        if !has_extension {
            path.push("index.html");
        }
        Ok(path)
    }
}

#[async_trait]
impl Uploader for FsUploader {
    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| UploadError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| UploadError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), content_type, "wrote object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        puts: Mutex<Vec<(String, Vec<u8>, String)>>,
    }

    #[async_trait]
    impl Uploader for Recording {
        async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError> {
            self.puts
                .lock()
                .unwrap()
                .push((key.to_string(), body.to_vec(), content_type.to_string()));
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Uploader for Failing {
        async fn put(&self, _key: &str, _body: &[u8], _content_type: &str) -> Result<(), UploadError> {
            Err(UploadError::Backend("access denied".into()))
        }
    }

    #[tokio::test]
    async fn test_upload_key_is_host_plus_url() {
        let uploader = Recording::default();
        let key = upload("academy.rubydex.com", "/en/glossary", "<html></html>", &uploader)
            .await
            .unwrap();
        assert_eq!(key, "academy.rubydex.com/en/glossary");

        let puts = uploader.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "academy.rubydex.com/en/glossary");
        assert_eq!(puts[0].1, b"<html></html>");
        assert_eq!(puts[0].2, "text/html");
    }

    #[tokio::test]
    async fn test_upload_failure_propagates() {
        let err = upload("blog.rubydex.com", "/en", "", &Failing).await.unwrap_err();
        assert!(matches!(err, UploadError::Backend(_)));
    }

    #[tokio::test]
    async fn test_fs_uploader_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = FsUploader::new(dir.path());

        upload("blog.rubydex.com", "/en", "<p>home</p>", &uploader).await.unwrap();
        upload("blog.rubydex.com", "/en/defi", "<p>defi</p>", &uploader).await.unwrap();

        let index = std::fs::read_to_string(dir.path().join("blog.rubydex.com/en/index.html")).unwrap();
        assert_eq!(index, "<p>home</p>");
        let article =
            std::fs::read_to_string(dir.path().join("blog.rubydex.com/en/defi/index.html")).unwrap();
        assert_eq!(article, "<p>defi</p>");

        // The same page with a trailing slash lands in the same file.
        upload("blog.rubydex.com", "/en/", "<p>home v2</p>", &uploader).await.unwrap();
        let index = std::fs::read_to_string(dir.path().join("blog.rubydex.com/en/index.html")).unwrap();
        assert_eq!(index, "<p>home v2</p>");
    }

    #[test]
    fn test_fs_uploader_paths() {
        let uploader = FsUploader::new("/tmp/out");
        assert_eq!(
            uploader.path_for("blog.rubydex.com/en").unwrap(),
            PathBuf::from("/tmp/out/blog.rubydex.com/en/index.html")
        );
        assert_eq!(
            uploader.path_for("blog.rubydex.com/en/").unwrap(),
            PathBuf::from("/tmp/out/blog.rubydex.com/en/index.html")
        );
        assert_eq!(
            uploader.path_for("blog.rubydex.com/sitemap.xml").unwrap(),
            PathBuf::from("/tmp/out/blog.rubydex.com/sitemap.xml")
        );
        assert_eq!(
            uploader.path_for("blog.rubydex.com/en/v1.2-release").unwrap(),
            PathBuf::from("/tmp/out/blog.rubydex.com/en/v1.2-release/index.html")
        );
    }

    #[test]
    fn test_fs_uploader_rejects_escaping_keys() {
        let uploader = FsUploader::new("/tmp/out");
        assert!(matches!(uploader.path_for("host/../etc"), Err(UploadError::InvalidKey(_))));
        assert!(matches!(uploader.path_for(""), Err(UploadError::InvalidKey(_))));
    }
}
