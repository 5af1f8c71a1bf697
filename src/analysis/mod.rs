//! Analysis layer: everything computed from a loaded dataset.
//!
//! ```text
//!   TabularDataset ──► stats::describe ──► SummaryStatistics
//!         │
//!         ▼
//!   axis::select_axes ──► AxisPair ──► relationship::analyze ──► RelationshipMetrics
//!                                                                      │
//!                                          narrative::narrate ◄────────┘
//! ```

pub mod axis;
pub mod narrative;
pub mod relationship;
pub mod stats;

/// Relative-tolerance float comparison for tests.
#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}
