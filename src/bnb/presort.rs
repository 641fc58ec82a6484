//! Branch-ordering heuristic.
//!
//! Items are explored in descending standalone score so that strong
//! loadouts fill the result set early and the score bound starts pruning
//! sooner. Ordering never changes which scores are reachable.

use super::compile::CompiledSlot;
use crate::model::{Item, Priority};

/// Weighted score of a single item: `sum(stat * weight)` over priorities.
///
/// Stats without a priority contribute nothing.
///
/// # Examples
///
/// ```
/// use u_loadout::bnb::standalone_score;
/// use u_loadout::model::{Item, Priority};
///
/// let item = Item::new(1, "Armor Focus").with_stat(1, 20.0).with_stat(2, 5.0);
/// let score = standalone_score(&item, &[Priority::new(1, 1.0), Priority::new(2, 0.5)]);
/// assert_eq!(score, 22.5);
/// ```
pub fn standalone_score(item: &Item, priorities: &[Priority]) -> f64 {
    priorities
        .iter()
        .filter_map(|p| item.stats.get(&p.stat).map(|v| v * p.weight))
        .sum()
}

/// Sorts each slot's items by descending standalone score.
///
/// The sort is stable: equal scores keep their input order, which keeps the
/// search deterministic.
pub(crate) fn presort(slots: &mut [CompiledSlot]) {
    for slot in slots {
        slot.items.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::compile::CompiledProblem;
    use crate::model::Slot;

    #[test]
    fn test_standalone_score_ignores_unweighted_stats() {
        let item = Item::new(1, "x").with_stat(1, 4.0).with_stat(9, 1000.0);
        assert_eq!(standalone_score(&item, &[Priority::new(1, -2.0)]), -8.0);
        assert_eq!(standalone_score(&item, &[]), 0.0);
    }

    #[test]
    fn test_presort_descending_and_stable() {
        let slots = vec![Slot::new(1, "s").with_items([
            Item::new(1, "low").with_stat(1, 1.0),
            Item::new(2, "tie_a").with_stat(1, 5.0),
            Item::new(3, "high").with_stat(1, 9.0),
            Item::new(4, "tie_b").with_stat(1, 5.0),
        ])];
        let mut problem = CompiledProblem::compile(&slots, &[], &[Priority::new(1, 1.0)]);
        presort(&mut problem.slots);

        let order: Vec<usize> = problem.slots[0].items.iter().map(|i| i.source).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }
}
