//! Slot, item, constraint and priority value types.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::operator::Operator;
use crate::error::ModelError;

/// Identifier of a slot.
pub type SlotId = u32;
/// Identifier of an item.
pub type ItemId = u32;
/// Identifier of a stat.
pub type StatId = u32;

/// A candidate occupant of one or more slots.
///
/// # Examples
///
/// ```
/// use u_loadout::model::Item;
///
/// let helm = Item::new(1, "Iron Helm").with_stat(1, 15.0).with_stat(2, 6.0);
/// assert_eq!(helm.stat(1), 15.0);
/// assert_eq!(helm.stat(99), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Item identity. The same id in several slots denotes the same item.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Stat contributions. Missing stats contribute zero.
    pub stats: BTreeMap<StatId, f64>,
}

impl Item {
    /// Creates an item with no stats.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stats: BTreeMap::new(),
        }
    }

    /// Sets a stat contribution.
    pub fn with_stat(mut self, stat: StatId, value: f64) -> Self {
        self.stats.insert(stat, value);
        self
    }

    /// Returns the item's contribution to `stat` (zero when absent).
    pub fn stat(&self, stat: StatId) -> f64 {
        self.stats.get(&stat).copied().unwrap_or(0.0)
    }
}

/// An ordered position filled by at most one compatible item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub id: SlotId,
    pub name: String,
    /// Items allowed in this slot, already filtered by the caller.
    pub items: Vec<Item>,
}

impl Slot {
    pub fn new(id: SlotId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Adds a compatible item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Adds several compatible items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }
}

/// A hard pass/fail condition on an aggregate stat total.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub stat: StatId,
    #[cfg_attr(feature = "serde", serde(rename = "operator"))]
    pub op: Operator,
    pub value: f64,
}

impl Constraint {
    pub fn new(stat: StatId, op: Operator, value: f64) -> Self {
        Self { stat, op, value }
    }

    /// Builds a constraint from an operator symbol, rejecting unknown symbols.
    ///
    /// ```
    /// use u_loadout::model::{Constraint, Operator};
    ///
    /// let c = Constraint::parse(2, "<=", 30.0).unwrap();
    /// assert_eq!(c.op, Operator::Le);
    /// assert!(Constraint::parse(2, "~", 30.0).is_err());
    /// ```
    pub fn parse(stat: StatId, op: &str, value: f64) -> Result<Self, ModelError> {
        Ok(Self::new(stat, Operator::from_str(op)?, value))
    }

    /// Convenience: `stat <= value`.
    pub fn at_most(stat: StatId, value: f64) -> Self {
        Self::new(stat, Operator::Le, value)
    }

    /// Convenience: `stat >= value`.
    pub fn at_least(stat: StatId, value: f64) -> Self {
        Self::new(stat, Operator::Ge, value)
    }

    /// Convenience: `stat == value` (within tolerance).
    pub fn exactly(stat: StatId, value: f64) -> Self {
        Self::new(stat, Operator::Eq, value)
    }
}

/// A signed weight on a stat.
///
/// Positive weights maximize the stat, negative weights minimize it.
/// Zero weights are meaningless and should be dropped before solving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority {
    pub stat: StatId,
    pub weight: f64,
}

impl Priority {
    pub fn new(stat: StatId, weight: f64) -> Self {
        Self { stat, weight }
    }
}

/// Complete input of one solve call.
///
/// # Examples
///
/// ```
/// use u_loadout::model::{Constraint, Item, LoadoutProblem, Priority, Slot};
///
/// let problem = LoadoutProblem::new(vec![
///     Slot::new(1, "Head").with_item(Item::new(1, "Helm").with_stat(1, 10.0)),
/// ])
/// .with_constraint(Constraint::at_most(2, 30.0))
/// .with_priority(Priority::new(1, 1.0));
///
/// assert_eq!(problem.item_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutProblem {
    /// Slots in search order.
    pub slots: Vec<Slot>,
    pub constraints: Vec<Constraint>,
    pub priorities: Vec<Priority>,
}

impl LoadoutProblem {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            constraints: Vec::new(),
            priorities: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.push(priority);
        self
    }

    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities.extend(priorities);
        self
    }

    /// Total number of (slot, item) pairs, counting shared items once per slot.
    pub fn item_count(&self) -> usize {
        self.slots.iter().map(|s| s.items.len()).sum()
    }

    /// Upper bound on the number of leaves: the product of `items + 1` per slot.
    ///
    /// Saturates at `u128::MAX`.
    pub fn search_space(&self) -> u128 {
        self.slots.iter().fold(1u128, |acc, s| {
            acc.saturating_mul(s.items.len() as u128 + 1)
        })
    }
}
