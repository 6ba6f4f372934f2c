//! Hydration and route transitions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use folio_core::{
    page_str, PhaseTiming, PipelinePhase, PreloadedData, PreloadedError, RouteAction, RouteState, TimingContext,
};
use folio_data::{load_content, FetchMany};
use folio_router::{RegistryError, RouteResolver};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{mpsc, watch};

use crate::host::ClientHost;
use crate::state::{ActivePage, NavigationState, PageHandle};

/// Where the site root redirects to.
pub const DEFAULT_HOME_PATH: &str = "/en";

/// What became of a route event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Repeat of the displayed pathname; nothing done.
    Suppressed,
    /// Root path; the host was sent to the home path.
    Redirected,
    /// No template for the route; the page is unchanged.
    NotFound,
    /// Resolution, module loading, or content loading failed; the page is unchanged.
    Failed,
    /// Loaded, but a later transition had started; the result was dropped.
    Superseded,
    /// The new page is displayed.
    Committed,
}

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum HydrationError {
    #[error("server rendered unknown template: {0}")]
    UnknownTemplate(String),

    #[error(transparent)]
    Module(#[from] RegistryError),

    #[error(transparent)]
    Preloaded(#[from] PreloadedError),
}

/// Owns the displayed page and drives it through route events.
///
/// Only the most recently started transition may commit; results of earlier
/// transitions that finish late are dropped.
pub struct NavigationController {
    resolver: RouteResolver,
    fetch: Arc<dyn FetchMany>,
    host: Arc<dyn ClientHost>,
    home_path: String,
    seq: AtomicU64,
    state: watch::Sender<NavigationState>,
    last_timings: Mutex<Vec<PhaseTiming>>,
}

impl NavigationController {
    pub fn new(resolver: RouteResolver, fetch: Arc<dyn FetchMany>, host: Arc<dyn ClientHost>) -> Self {
        let (state, _) = watch::channel(NavigationState::default());
        Self {
            resolver,
            fetch,
            host,
            home_path: DEFAULT_HOME_PATH.to_string(),
            seq: AtomicU64::new(0),
            state,
            last_timings: Mutex::new(Vec::new()),
        }
    }

    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    /// A handle for observing the displayed page.
    pub fn subscribe(&self) -> PageHandle {
        PageHandle::new(self.state.subscribe())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Phase timings of the most recent committed transition.
    pub fn last_timings(&self) -> Vec<PhaseTiming> {
        self.last_timings.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Adopt the page the server rendered, without fetching anything.
    ///
    /// An empty template name means there was no server render; nothing is
    /// published and the first route event loads normally.
    #[tracing::instrument(skip(self, preloaded, route), fields(template = %preloaded.template_name, pathname = %route.pathname))]
    pub async fn hydrate(&self, preloaded: PreloadedData, route: &RouteState) -> Result<(), HydrationError> {
        if preloaded.is_empty() {
            tracing::debug!("no server render to hydrate");
            return Ok(());
        }

        let template = self
            .resolver
            .registry()
            .find_by_name(&preloaded.template_name)
            .ok_or_else(|| HydrationError::UnknownTemplate(preloaded.template_name.clone()))?;
        let module = template.materialize().await?;

        let page = ActivePage::new(template.name(), Arc::clone(&module.component), preloaded.page_data);
        self.state.send_modify(|state| {
            state.page = Some(page);
            state.current_pathname = Some(route.pathname.clone());
            state.current_locale = Some(route.locale.clone());
            state.committed_seq = 0;
        });
        tracing::debug!("hydrated");
        Ok(())
    }

    /// Hydrate from a served HTML document's bootstrap payload.
    pub async fn hydrate_document(&self, html: &str, route: &RouteState) -> Result<(), HydrationError> {
        let preloaded = PreloadedData::from_document(html)?;
        self.hydrate(preloaded, route).await
    }

    /// Process one route event to completion.
    pub async fn handle_event(&self, route: RouteState) -> TransitionOutcome {
        match self.begin(&route) {
            Ok(seq) => self.transition(seq, route).await,
            Err(outcome) => outcome,
        }
    }

    /// Consume route events until the channel closes.
    ///
    /// Events are filtered in arrival order; the resolve/load work of
    /// accepted events runs concurrently so a slow load never holds up a
    /// later one.
    pub async fn run(&self, mut events: mpsc::Receiver<RouteState>) {
        let mut in_flight = FuturesUnordered::new();
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(route) => {
                        if let Ok(seq) = self.begin(&route) {
                            in_flight.push(self.transition(seq, route));
                        }
                    }
                    None => break,
                },
                Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                    tracing::trace!(?outcome, "transition finished");
                }
            }
        }
        while let Some(outcome) = in_flight.next().await {
            tracing::trace!(?outcome, "transition finished");
        }
    }

    /// Filter an event and, if it needs loading, claim a sequence number.
    fn begin(&self, route: &RouteState) -> Result<u64, TransitionOutcome> {
        let repeat = {
            let state = self.state.borrow();
            state.current_pathname.as_deref() == Some(route.pathname.as_str())
        };
        // INIT for the hydrated path is the page already on screen.
        if repeat && (route.action.is_write() || route.action == RouteAction::Init) {
            tracing::debug!(pathname = %route.pathname, action = ?route.action, "suppressed repeat navigation");
            return Err(TransitionOutcome::Suppressed);
        }

        if route.is_root() {
            tracing::debug!(to = %self.home_path, "redirecting root");
            self.host.goto(&self.home_path);
            return Err(TransitionOutcome::Redirected);
        }

        Ok(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[tracing::instrument(skip(self, route), fields(pathname = %route.pathname))]
    async fn transition(&self, seq: u64, route: RouteState) -> TransitionOutcome {
        let mut timing = TimingContext::new();

        timing.begin(PipelinePhase::Resolve);
        let template = match self.resolver.resolve(&route.slug, &route.pathname, &route.href).await {
            Ok(Some(template)) => template,
            Ok(None) => {
                tracing::warn!("template not found");
                return TransitionOutcome::NotFound;
            }
            Err(err) => {
                tracing::warn!(error = %err, "route resolution failed");
                return TransitionOutcome::Failed;
            }
        };
        timing.end(PipelinePhase::Resolve);

        timing.begin(PipelinePhase::Materialize);
        let module = match template.materialize().await {
            Ok(module) => module,
            Err(err) => {
                tracing::warn!(error = %err, "template module failed to load");
                return TransitionOutcome::Failed;
            }
        };
        timing.end(PipelinePhase::Materialize);

        timing.begin(PipelinePhase::Load);
        let page_data = match load_content(
            &route.locale,
            &route.slug,
            &module.page_data_loaders,
            self.fetch.as_ref(),
        )
        .await
        {
            Ok(page_data) => page_data,
            Err(err) => {
                tracing::warn!(error = %err, "content load failed");
                return TransitionOutcome::Failed;
            }
        };
        timing.end(PipelinePhase::Load);

        let title = page_str(&page_data, "title").map(str::to_string);
        let page = ActivePage::new(template.name(), Arc::clone(&module.component), page_data);

        timing.begin(PipelinePhase::Commit);
        let mut had_page = false;
        let committed = self.state.send_if_modified(|state| {
            if self.seq.load(Ordering::SeqCst) != seq {
                return false;
            }
            had_page = state.page.is_some();
            state.page = Some(page);
            state.current_pathname = Some(route.pathname.clone());
            state.current_locale = Some(route.locale.clone());
            state.committed_seq = seq;
            true
        });

        if !committed {
            tracing::debug!(seq, "dropping superseded result");
            return TransitionOutcome::Superseded;
        }

        if let Some(title) = title {
            self.host.set_title(&title);
        }
        if had_page {
            self.host.scroll_to_top();
        }
        timing.end(PipelinePhase::Commit);

        timing.log_summary("transition");
        if let Ok(mut last) = self.last_timings.lock() {
            *last = timing.phases();
        }
        tracing::debug!(seq, template = template.name(), "committed");
        TransitionOutcome::Committed
    }
}
