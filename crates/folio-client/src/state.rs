//! The displayed page and its observers.

use std::fmt;
use std::sync::Arc;

use folio_core::{Component, Locale, PageData, RenderContext};
use tokio::sync::watch;

/// The component/page-data pair currently on screen.
#[derive(Clone)]
pub struct ActivePage {
    pub template_name: String,
    pub component: Arc<dyn Component>,
    pub page_data: Arc<PageData>,
}

impl ActivePage {
    pub fn new(template_name: impl Into<String>, component: Arc<dyn Component>, page_data: PageData) -> Self {
        Self {
            template_name: template_name.into(),
            component,
            page_data: Arc::new(page_data),
        }
    }

    /// Render the page's markup.
    pub fn render(&self, cx: &mut RenderContext) -> String {
        self.component.render(&self.page_data, cx)
    }
}

impl fmt::Debug for ActivePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivePage")
            .field("template_name", &self.template_name)
            .field("page_data", &self.page_data)
            .finish_non_exhaustive()
    }
}

/// Everything the controller has committed.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub page: Option<ActivePage>,
    /// Pathname of the last committed (or hydrated) route.
    pub current_pathname: Option<String>,
    pub current_locale: Option<Locale>,
    /// Sequence number of the transition that produced `page`; 0 for hydration.
    pub committed_seq: u64,
}

impl NavigationState {
    pub fn template_name(&self) -> Option<&str> {
        self.page.as_ref().map(|p| p.template_name.as_str())
    }
}

/// Read-only view of the navigation state for the UI layer.
#[derive(Debug, Clone)]
pub struct PageHandle {
    rx: watch::Receiver<NavigationState>,
}

impl PageHandle {
    pub(crate) fn new(rx: watch::Receiver<NavigationState>) -> Self {
        Self { rx }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> NavigationState {
        self.rx.borrow().clone()
    }

    /// Render the displayed page, if any.
    pub fn render(&self) -> Option<String> {
        let page = self.rx.borrow().page.clone()?;
        Some(page.render(&mut RenderContext::new()))
    }

    /// Wait for the next commit. Errors once the controller is gone.
    pub async fn changed(&mut self) -> Result<NavigationState, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
