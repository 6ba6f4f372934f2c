//! Side effects the controller asks of its host environment.

use std::sync::Mutex;

/// Browser operations used during navigation.
pub trait ClientHost: Send + Sync {
    /// Navigate to a path through the router; produces a new route event.
    fn goto(&self, path: &str);

    fn scroll_to_top(&self);

    fn set_title(&self, title: &str);
}

/// A host call, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Goto(String),
    ScrollToTop,
    SetTitle(String),
}

/// Host that only records calls, for headless runs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HostCall>> {
        // A poisoned log is still a valid log.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: HostCall) {
        tracing::trace!(?call, "host call");
        self.lock().push(call);
    }
}

impl ClientHost for RecordingHost {
    fn goto(&self, path: &str) {
        self.record(HostCall::Goto(path.to_string()));
    }

    fn scroll_to_top(&self) {
        self.record(HostCall::ScrollToTop);
    }

    fn set_title(&self, title: &str) {
        self.record(HostCall::SetTitle(title.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let host = RecordingHost::new();
        host.goto("/en");
        host.set_title("Blog");
        host.scroll_to_top();
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Goto("/en".into()),
                HostCall::SetTitle("Blog".into()),
                HostCall::ScrollToTop,
            ]
        );
        host.clear();
        assert!(host.calls().is_empty());
    }
}
