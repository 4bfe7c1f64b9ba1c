//! Logging facilities for Tagflow.
//!
//! Tagflow uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tagflow=debug")
//!     .init();
//! ```
//!
//! Every event is emitted with one of the [`targets`] below, so each
//! subsystem can be filtered independently.

/// Span names used throughout Tagflow for tracing.
pub mod span_names {
    /// Flow layout pass.
    pub const LAYOUT: &str = "tagflow::layout";
    /// Batched structural update (insert/remove chips).
    pub const BATCH: &str = "tagflow::batch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Tag store mutations.
    pub const STORE: &str = "tagflow::store";
    /// Per-chip edit interpretation.
    pub const CELL: &str = "tagflow::cell";
    /// Orchestration of cells and store.
    pub const CONTROLLER: &str = "tagflow::controller";
    /// Flow layout and size invalidation.
    pub const LAYOUT: &str = "tagflow::layout";
    /// Signal/slot system.
    pub const SIGNAL: &str = "tagflow::signal";
    /// Performance spans.
    pub const PERF: &str = "tagflow::perf";
}

/// A guard that records the duration of an operation as a tracing span.
///
/// The span stays entered until the guard is dropped.
///
/// ```
/// use tagflow_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("flow_layout");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "tagflow::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::STORE,
            targets::CELL,
            targets::CONTROLLER,
            targets::LAYOUT,
            targets::SIGNAL,
            targets::PERF,
        ] {
            assert!(target.starts_with("tagflow::"));
        }
    }

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
    }
}
