// src/merge.rs
// Reconcile a cycle's ranked trips with the previously persisted top set
// and decide whether the visible top-N changed.

use crate::equality::{dedup_trips, sequences_equal};
use crate::model::{Trip, TripPriority};
use crate::rank::order_trips;

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// New top-N, ready to persist.
    pub top: Vec<Trip>,
    /// Whether the visible top-N differs from the previous one in
    /// membership, order or count.
    pub changed: bool,
}

/// Merge persisted trips with this cycle's ranked trips. Persisted trips
/// come first, so they win the first-seen-wins dedup when structurally
/// equal. The merged set is re-ranked by the same priority and truncated
/// to `max_top_results`; change detection compares the previous top-N with
/// the new one as an ordered sequence.
pub fn merge_with_persisted(
    persisted: Vec<Trip>,
    ranked: Vec<Trip>,
    priority: TripPriority,
    max_top_results: usize,
) -> MergeOutcome {
    let previous_top: Vec<Trip> = persisted.iter().take(max_top_results).cloned().collect();

    let mut combined = persisted;
    combined.extend(ranked);
    let merged = dedup_trips(combined);

    let mut top = order_trips(merged, priority);
    top.truncate(max_top_results);

    let changed = !sequences_equal(&previous_top, &top);
    MergeOutcome { top, changed }
}
