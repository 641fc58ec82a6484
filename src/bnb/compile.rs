//! Dense, index-based view of a problem for the search loop.
//!
//! Stat ids referenced by constraints are mapped to `0..stat_count` so that
//! running totals live in a flat `Vec<f64>`; item ids are mapped to dense
//! keys so that the used-item set is a `Vec<bool>`. Stats that no constraint
//! references never affect feasibility, so they are folded into each item's
//! standalone score and otherwise dropped from the hot path.

use std::collections::HashMap;

use crate::model::{Constraint, ItemId, Operator, Priority, Slot, StatId};

/// An item as seen by the search.
#[derive(Debug, Clone)]
pub(crate) struct CompiledItem {
    /// Index into the source slot's `items`.
    pub source: usize,
    /// Dense key shared by every occurrence of the same item id.
    pub key: usize,
    /// Contributions to constrained stats: `(stat index, value)`.
    pub stats: Vec<(usize, f64)>,
    /// Standalone weighted score.
    pub score: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledSlot {
    pub items: Vec<CompiledItem>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CompiledConstraint {
    pub stat: usize,
    pub op: Operator,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledProblem {
    pub slots: Vec<CompiledSlot>,
    pub constraints: Vec<CompiledConstraint>,
    /// Constrained stat ids, indexed by stat index.
    pub stat_ids: Vec<StatId>,
    /// Number of distinct item ids.
    pub key_count: usize,
}

impl CompiledProblem {
    pub fn compile(slots: &[Slot], constraints: &[Constraint], priorities: &[Priority]) -> Self {
        let mut stat_index: HashMap<StatId, usize> = HashMap::new();
        let mut stat_ids = Vec::new();
        for c in constraints {
            stat_index.entry(c.stat).or_insert_with(|| {
                stat_ids.push(c.stat);
                stat_ids.len() - 1
            });
        }

        let mut keys: HashMap<ItemId, usize> = HashMap::new();
        let compiled_slots = slots
            .iter()
            .map(|slot| CompiledSlot {
                items: slot
                    .items
                    .iter()
                    .enumerate()
                    .map(|(source, item)| {
                        let next = keys.len();
                        let key = *keys.entry(item.id).or_insert(next);
                        let stats = item
                            .stats
                            .iter()
                            .filter_map(|(stat, &value)| {
                                stat_index.get(stat).map(|&idx| (idx, value))
                            })
                            .collect();
                        CompiledItem {
                            source,
                            key,
                            stats,
                            score: super::presort::standalone_score(item, priorities),
                        }
                    })
                    .collect(),
            })
            .collect();

        let constraints = constraints
            .iter()
            .map(|c| CompiledConstraint {
                stat: stat_index[&c.stat],
                op: c.op,
                value: c.value,
            })
            .collect();

        Self {
            slots: compiled_slots,
            constraints,
            stat_ids,
            key_count: keys.len(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn stat_count(&self) -> usize {
        self.stat_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    #[test]
    fn test_shared_items_share_key() {
        let ring = Item::new(10, "Gold Ring").with_stat(1, 10.0);
        let slots = vec![
            Slot::new(1, "Ring1").with_items([ring.clone(), Item::new(11, "Silver")]),
            Slot::new(2, "Ring2").with_item(ring),
        ];
        let problem = CompiledProblem::compile(&slots, &[], &[Priority::new(1, 1.0)]);

        assert_eq!(problem.key_count, 2);
        assert_eq!(problem.slots[0].items[0].key, problem.slots[1].items[0].key);
        assert_ne!(problem.slots[0].items[1].key, problem.slots[0].items[0].key);
    }

    #[test]
    fn test_only_constrained_stats_tracked() {
        let slots = vec![Slot::new(1, "Head")
            .with_item(Item::new(1, "Helm").with_stat(1, 10.0).with_stat(2, 4.0))];
        let constraints = [Constraint::at_most(2, 30.0), Constraint::at_least(2, 1.0)];
        let problem = CompiledProblem::compile(&slots, &constraints, &[Priority::new(1, 2.0)]);

        assert_eq!(problem.stat_ids, vec![2]);
        assert_eq!(problem.constraints.len(), 2);
        assert!(problem.constraints.iter().all(|c| c.stat == 0));
        let item = &problem.slots[0].items[0];
        assert_eq!(item.stats, vec![(0, 4.0)]);
        assert!((item.score - 20.0).abs() < 1e-12);
    }
}
