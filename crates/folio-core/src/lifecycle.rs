//! Pipeline phase timing.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Phases of a single resolve/load/render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelinePhase {
    /// URL to template resolution.
    Resolve,
    /// Lazy template module loading.
    Materialize,
    /// Content queries and merge.
    Load,
    /// Build manifest lookup.
    Manifest,
    /// Component and document rendering.
    Render,
    /// Client-side swap of the displayed page.
    Commit,
}

impl PipelinePhase {
    /// Name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Materialize => "materialize",
            Self::Load => "load",
            Self::Manifest => "manifest",
            Self::Render => "render",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records when each phase started and finished.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    started: HashMap<PipelinePhase, Instant>,
    finished: HashMap<PipelinePhase, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            started: HashMap::new(),
            finished: HashMap::new(),
        }
    }

    /// Mark a phase as started.
    pub fn begin(&mut self, phase: PipelinePhase) {
        self.started.insert(phase, Instant::now());
    }

    /// Mark a phase as finished.
    pub fn end(&mut self, phase: PipelinePhase) {
        self.finished.insert(phase, Instant::now());
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Duration of a completed phase.
    pub fn phase(&self, phase: PipelinePhase) -> Option<Duration> {
        let start = self.started.get(&phase)?;
        let end = self.finished.get(&phase)?;
        Some(end.duration_since(*start))
    }

    /// Completed phases in pipeline order.
    pub fn phases(&self) -> Vec<PhaseTiming> {
        [
            PipelinePhase::Resolve,
            PipelinePhase::Materialize,
            PipelinePhase::Load,
            PipelinePhase::Manifest,
            PipelinePhase::Render,
            PipelinePhase::Commit,
        ]
        .into_iter()
        .filter_map(|phase| {
            self.phase(phase).map(|duration| PhaseTiming { phase, duration })
        })
        .collect()
    }

    /// Emit a debug event with all completed phase timings.
    pub fn log_summary(&self, what: &str) {
        let phases: Vec<String> = self
            .phases()
            .iter()
            .map(|t| format!("{}={}us", t.phase, t.duration.as_micros()))
            .collect();
        tracing::debug!(
            total_us = self.elapsed().as_micros() as u64,
            phases = %phases.join(" "),
            "{} timings",
            what
        );
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing information for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub phase: PipelinePhase,
    pub duration: Duration,
}
