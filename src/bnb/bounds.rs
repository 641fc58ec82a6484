//! Suffix bounds for pruning.
//!
//! For every slot the best standalone score and the lowest/highest
//! contribution to each constrained stat are taken over its items and the
//! empty option (which contributes zero). Suffix sums over slots `d..end`
//! then give, in O(1) at any depth, the best score still obtainable and the
//! range of totals still reachable.

use super::compile::CompiledProblem;

#[derive(Debug, Clone)]
pub(crate) struct Bounds {
    /// `suffix_max_score[d]`: best score obtainable from slots `d..`.
    suffix_max_score: Vec<f64>,
    /// `suffix_min_stat[s][d]`: lowest contribution to stat `s` from slots `d..`.
    suffix_min_stat: Vec<Vec<f64>>,
    /// `suffix_max_stat[s][d]`: highest contribution to stat `s` from slots `d..`.
    suffix_max_stat: Vec<Vec<f64>>,
}

impl Bounds {
    pub fn compute(problem: &CompiledProblem) -> Self {
        let n = problem.slot_count();
        let stat_count = problem.stat_count();

        let mut suffix_max_score = vec![0.0; n + 1];
        let mut suffix_min_stat = vec![vec![0.0; n + 1]; stat_count];
        let mut suffix_max_stat = vec![vec![0.0; n + 1]; stat_count];

        // Reused per slot; index = stat index.
        let mut slot_min = vec![0.0f64; stat_count];
        let mut slot_max = vec![0.0f64; stat_count];

        for d in (0..n).rev() {
            let slot = &problem.slots[d];

            let slot_max_score = slot
                .items
                .iter()
                .map(|item| item.score)
                .fold(0.0f64, f64::max);
            suffix_max_score[d] = suffix_max_score[d + 1] + slot_max_score;

            slot_min.fill(0.0);
            slot_max.fill(0.0);
            for item in &slot.items {
                for &(stat, value) in &item.stats {
                    slot_min[stat] = slot_min[stat].min(value);
                    slot_max[stat] = slot_max[stat].max(value);
                }
            }
            for s in 0..stat_count {
                suffix_min_stat[s][d] = suffix_min_stat[s][d + 1] + slot_min[s];
                suffix_max_stat[s][d] = suffix_max_stat[s][d + 1] + slot_max[s];
            }
        }

        Self {
            suffix_max_score,
            suffix_min_stat,
            suffix_max_stat,
        }
    }

    /// Best score obtainable from slots `depth..`.
    #[inline]
    pub fn max_score_from(&self, depth: usize) -> f64 {
        self.suffix_max_score[depth]
    }

    /// Lowest and highest contribution to `stat` from slots `depth..`.
    #[inline]
    pub fn stat_range_from(&self, stat: usize, depth: usize) -> (f64, f64) {
        (
            self.suffix_min_stat[stat][depth],
            self.suffix_max_stat[stat][depth],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, Item, Priority, Slot};

    fn compile(slots: &[Slot], constraints: &[Constraint]) -> CompiledProblem {
        CompiledProblem::compile(slots, constraints, &[Priority::new(1, 1.0)])
    }

    #[test]
    fn test_suffix_max_score() {
        let slots = vec![
            Slot::new(1, "Head").with_items([
                Item::new(1, "a").with_stat(1, 5.0),
                Item::new(2, "b").with_stat(1, 15.0),
            ]),
            Slot::new(2, "Chest").with_item(Item::new(3, "c").with_stat(1, 20.0)),
        ];
        let bounds = Bounds::compute(&compile(&slots, &[]));

        assert_eq!(bounds.max_score_from(0), 35.0);
        assert_eq!(bounds.max_score_from(1), 20.0);
        assert_eq!(bounds.max_score_from(2), 0.0);
    }

    #[test]
    fn test_negative_items_floor_at_empty() {
        let slots =
            vec![Slot::new(1, "Head").with_item(Item::new(1, "Cursed").with_stat(1, -10.0))];
        let bounds = Bounds::compute(&compile(&slots, &[]));

        assert_eq!(bounds.max_score_from(0), 0.0);
    }

    #[test]
    fn test_stat_ranges_include_empty_option() {
        let slots = vec![
            Slot::new(1, "Head").with_items([
                Item::new(1, "heavy").with_stat(2, 20.0),
                Item::new(2, "light").with_stat(2, 5.0),
            ]),
            Slot::new(2, "Charm").with_item(Item::new(3, "feather").with_stat(2, -3.0)),
            Slot::new(3, "Empty"),
        ];
        let bounds = Bounds::compute(&compile(&slots, &[Constraint::at_most(2, 30.0)]));

        // Head: [0, 20], Charm: [-3, 0], Empty: [0, 0]
        assert_eq!(bounds.stat_range_from(0, 0), (-3.0, 20.0));
        assert_eq!(bounds.stat_range_from(0, 1), (-3.0, 0.0));
        assert_eq!(bounds.stat_range_from(0, 2), (0.0, 0.0));
        assert_eq!(bounds.stat_range_from(0, 3), (0.0, 0.0));
    }

    #[test]
    fn test_no_slots() {
        let bounds = Bounds::compute(&compile(&[], &[Constraint::at_least(1, 1.0)]));
        assert_eq!(bounds.max_score_from(0), 0.0);
        assert_eq!(bounds.stat_range_from(0, 0), (0.0, 0.0));
    }
}
