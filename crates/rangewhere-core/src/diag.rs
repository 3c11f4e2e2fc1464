//! Advisory diagnostics boundary.
//!
//! Query logic MUST NOT alter results based on diagnostics; emission flows
//! through `DiagnosticsSink` so hosts and tests can observe or silence it.

use std::{cell::RefCell, sync::Arc};

///
/// Diagnostic
///
/// Non-fatal, advisory signals emitted at most once per call.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    /// Span pattern with neither a start nor an end sequence: the scan
    /// covers the whole collection.
    SpanWithoutBounds,
    /// Pattern carries predicate or regex matchers but no end bound could
    /// be derived: the scan runs to the end of the collection unless a
    /// predicate returns `Done`.
    UnboundedPredicateScan,
}

///
/// DiagnosticsSink
///

pub trait DiagnosticsSink {
    fn record(&self, diagnostic: Diagnostic);
}

///
/// DiagnosticsReport
///
/// Per-kind counters accumulated by the default sink.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticsReport {
    pub span_without_bounds: u64,
    pub unbounded_predicate_scan: u64,
}

#[derive(Default)]
struct DiagState {
    counters: DiagnosticsReport,
    overrides: Vec<Arc<dyn DiagnosticsSink>>,
}

thread_local! {
    static STATE: RefCell<DiagState> = RefCell::new(DiagState::default());
}

pub(crate) fn record(diagnostic: Diagnostic) {
    let sink = STATE.with(|state| state.borrow().overrides.last().cloned());
    if let Some(sink) = sink {
        sink.record(diagnostic);
        return;
    }

    STATE.with(|state| {
        let counters = &mut state.borrow_mut().counters;
        match diagnostic {
            Diagnostic::SpanWithoutBounds => {
                counters.span_without_bounds = counters.span_without_bounds.saturating_add(1);
            }
            Diagnostic::UnboundedPredicateScan => {
                counters.unbounded_predicate_scan =
                    counters.unbounded_predicate_scan.saturating_add(1);
            }
        }
    });
}

/// Run a closure with a scoped diagnostics sink override.
///
/// Overrides nest; the previous sink is restored on all exits, including
/// unwind.
pub fn with_diagnostics_sink<T>(sink: Arc<dyn DiagnosticsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard;

    impl Drop for Guard {
        fn drop(&mut self) {
            STATE.with(|state| {
                state.borrow_mut().overrides.pop();
            });
        }
    }

    STATE.with(|state| state.borrow_mut().overrides.push(sink));
    let _guard = Guard;

    f()
}

/// Snapshot the default sink's counters for the current thread.
#[must_use]
pub fn diagnostics_report() -> DiagnosticsReport {
    STATE.with(|state| state.borrow().counters)
}

/// Reset the default sink's counters for the current thread.
pub fn diagnostics_reset() {
    STATE.with(|state| {
        state.borrow_mut().counters = DiagnosticsReport::default();
    });
}

///
/// TESTS
///
