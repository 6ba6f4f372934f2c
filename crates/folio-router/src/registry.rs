//! Template definitions and the registry that indexes them.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::Component;
use folio_data::ContentLoader;
use tokio::sync::OnceCell;

/// A template's loaded code: its component and data requirements.
#[derive(Clone)]
pub struct TemplateModule {
    pub component: Arc<dyn Component>,
    pub page_data_loaders: Vec<ContentLoader>,
}

impl TemplateModule {
    pub fn new(component: impl Component + 'static) -> Self {
        Self {
            component: Arc::new(component),
            page_data_loaders: Vec::new(),
        }
    }

    pub fn with_loader(mut self, loader: ContentLoader) -> Self {
        self.page_data_loaders.push(loader);
        self
    }
}

impl fmt::Debug for TemplateModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateModule")
            .field("component", &self.component)
            .field("page_data_loaders", &self.page_data_loaders.len())
            .finish()
    }
}

/// A module failed to load.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ModuleLoadError(pub String);

/// Produces a template's module on first use.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self) -> Result<TemplateModule, ModuleLoadError>;
}

#[async_trait]
impl<F, Fut> ModuleLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<TemplateModule, ModuleLoadError>> + Send,
{
    async fn load(&self) -> Result<TemplateModule, ModuleLoadError> {
        (self)().await
    }
}

/// Registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate template name: {0}")]
    DuplicateName(String),

    #[error("duplicate template slug: {0}")]
    DuplicateSlug(String),

    #[error("failed to load template {name}: {source}")]
    Module {
        name: String,
        #[source]
        source: ModuleLoadError,
    },
}

/// A named page template whose module is loaded lazily and at most once.
pub struct Template {
    name: String,
    slug: Option<String>,
    loader: Box<dyn ModuleLoader>,
    module: OnceCell<Arc<TemplateModule>>,
}

impl Template {
    /// Create a template loaded by `loader`. It has no static slug.
    pub fn new(name: impl Into<String>, loader: impl ModuleLoader + 'static) -> Self {
        Self {
            name: name.into(),
            slug: None,
            loader: Box::new(loader),
            module: OnceCell::new(),
        }
    }

    /// Create a template whose module is built by a plain function on first use.
    pub fn lazy(name: impl Into<String>, build: fn() -> TemplateModule) -> Self {
        Self::new(name, move || async move { Ok::<_, ModuleLoadError>(build()) })
    }

    /// Bind the template to a fixed content slug such as `/glossary`.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Whether the module has been loaded already.
    pub fn is_materialized(&self) -> bool {
        self.module.initialized()
    }

    /// Load the module, or return the one loaded before.
    ///
    /// Concurrent callers share a single load. A failed load is not cached,
    /// so a later call tries again.
    pub async fn materialize(&self) -> Result<Arc<TemplateModule>, RegistryError> {
        let module = self
            .module
            .get_or_try_init(|| async {
                tracing::debug!(template = %self.name, "loading template module");
                self.loader.load().await.map(Arc::new)
            })
            .await
            .map_err(|source| RegistryError::Module {
                name: self.name.clone(),
                source,
            })?;
        Ok(Arc::clone(module))
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("slug", &self.slug)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

/// The set of templates a site can render.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Arc<Template>>,
}

impl TemplateRegistry {
    /// Build a registry; names must be unique, and so must static slugs.
    pub fn new(templates: impl IntoIterator<Item = Template>) -> Result<Self, RegistryError> {
        let mut names = HashSet::new();
        let mut slugs = HashSet::new();
        let mut list = Vec::new();
        for template in templates {
            if !names.insert(template.name.clone()) {
                return Err(RegistryError::DuplicateName(template.name));
            }
            if let Some(slug) = &template.slug {
                if !slugs.insert(slug.clone()) {
                    return Err(RegistryError::DuplicateSlug(slug.clone()));
                }
            }
            list.push(Arc::new(template));
        }
        Ok(Self { templates: list })
    }

    /// The template bound to a static slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<Arc<Template>> {
        self.templates
            .iter()
            .find(|t| t.slug.as_deref() == Some(slug))
            .cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.iter().find(|t| t.name == name).cloned()
    }

    pub fn templates(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
