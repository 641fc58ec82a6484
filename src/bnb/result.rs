//! Search output types.

use std::collections::BTreeMap;
use std::time::Duration;

use super::stats::SearchStats;
use super::stop::StopReason;
use crate::model::{ItemId, SlotId, StatId};

/// The decision for one slot within a result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    pub slot_id: SlotId,
    pub slot_name: String,
    /// `None` when the slot is left empty.
    pub item_id: Option<ItemId>,
    pub item_name: Option<String>,
    /// The assigned item's stats; empty when unassigned.
    pub item_stats: BTreeMap<StatId, f64>,
}

impl SlotAssignment {
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
    }
}

/// One complete loadout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverResult {
    /// One entry per slot, in slot order.
    pub assignments: Vec<SlotAssignment>,
    /// Weighted score of the assigned items.
    pub score: f64,
    /// Aggregate per stat over all assigned items.
    ///
    /// Contains every stat carried by an assigned item plus every
    /// constrained stat (zero when nothing contributes to it).
    pub stat_totals: BTreeMap<StatId, f64>,
}

impl SolverResult {
    /// Aggregate value of `stat` (zero when absent).
    pub fn total(&self, stat: StatId) -> f64 {
        self.stat_totals.get(&stat).copied().unwrap_or(0.0)
    }

    /// Ids of assigned items, in slot order.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.assignments.iter().filter_map(|a| a.item_id)
    }

    /// The item assigned to `slot`, if any.
    pub fn item_in(&self, slot: SlotId) -> Option<ItemId> {
        self.assignments
            .iter()
            .find(|a| a.slot_id == slot)
            .and_then(|a| a.item_id)
    }

    /// Copy with score and every stat value rounded to `decimals` places.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use u_loadout::bnb::SolverResult;
    ///
    /// let result = SolverResult {
    ///     assignments: vec![],
    ///     score: 22.499999,
    ///     stat_totals: BTreeMap::from([(1, 0.30000000000000004)]),
    /// };
    /// let shown = result.rounded(4);
    /// assert_eq!(shown.score, 22.5);
    /// assert_eq!(shown.total(1), 0.3);
    /// ```
    pub fn rounded(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        let round = |v: f64| (v * factor).round() / factor;
        let round_map = |m: &BTreeMap<StatId, f64>| -> BTreeMap<StatId, f64> {
            m.iter().map(|(&k, &v)| (k, round(v))).collect()
        };

        Self {
            assignments: self
                .assignments
                .iter()
                .map(|a| SlotAssignment {
                    item_stats: round_map(&a.item_stats),
                    ..a.clone()
                })
                .collect(),
            score: round(self.score),
            stat_totals: round_map(&self.stat_totals),
        }
    }
}

/// Output of one solve call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOutput {
    /// Up to `top_n` results, best first.
    pub results: Vec<SolverResult>,
    /// The search stopped on the deadline or the cancellation flag; `results`
    /// holds whatever had been found by then.
    pub timed_out: bool,
    pub stop_reason: Option<StopReason>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Leaves fully evaluated against the constraints.
    pub combinations_evaluated: u64,
    pub stats: SearchStats,
}

impl SolverOutput {
    /// Output of a call that did not search at all.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            timed_out: false,
            stop_reason: None,
            elapsed: Duration::ZERO,
            combinations_evaluated: 0,
            stats: SearchStats::default(),
        }
    }

    /// The best result, if any.
    pub fn best(&self) -> Option<&SolverResult> {
        self.results.first()
    }

    /// Whether the search explored the whole (pruned) tree.
    pub fn is_complete(&self) -> bool {
        !self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(slot: SlotId, item: Option<ItemId>) -> SlotAssignment {
        SlotAssignment {
            slot_id: slot,
            slot_name: format!("slot{slot}"),
            item_id: item,
            item_name: item.map(|i| format!("item{i}")),
            item_stats: item
                .map(|_| BTreeMap::from([(1, 1.0 / 3.0)]))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_accessors() {
        let result = SolverResult {
            assignments: vec![assignment(1, Some(7)), assignment(2, None), assignment(3, Some(9))],
            score: 2.0 / 3.0,
            stat_totals: BTreeMap::from([(1, 2.0 / 3.0)]),
        };
        assert_eq!(result.item_ids().collect::<Vec<_>>(), vec![7, 9]);
        assert_eq!(result.item_in(1), Some(7));
        assert_eq!(result.item_in(2), None);
        assert_eq!(result.item_in(42), None);
        assert!(result.assignments[1].is_empty());
        assert!((result.total(1) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.total(5), 0.0);
    }

    #[test]
    fn test_rounded() {
        let result = SolverResult {
            assignments: vec![assignment(1, Some(7))],
            score: 2.0 / 3.0,
            stat_totals: BTreeMap::from([(1, 2.0 / 3.0)]),
        };
        let shown = result.rounded(2);
        assert_eq!(shown.score, 0.67);
        assert_eq!(shown.total(1), 0.67);
        assert_eq!(shown.assignments[0].item_stats[&1], 0.33);
        assert_eq!(shown.assignments[0].item_name.as_deref(), Some("item7"));
    }

    #[test]
    fn test_empty_output() {
        let output = SolverOutput::empty();
        assert!(output.results.is_empty());
        assert!(output.best().is_none());
        assert!(output.is_complete());
        assert_eq!(output.elapsed, Duration::ZERO);
        assert_eq!(output.combinations_evaluated, 0);
    }
}
