//! Shared result type returned by both metaheuristic drivers.

use crate::fitness::Quality;
use crate::model::Layout;
use std::time::Duration;

/// Outcome of a completed (or cancelled) optimization run: the best layout
/// observed, its quality, and how much work went into finding it.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub layout: Layout,
    pub quality: Quality,
    pub elapsed: Duration,
    /// Iterations (ACO) or generations (GA) actually executed before
    /// completion or cancellation.
    pub rounds_run: usize,
}
