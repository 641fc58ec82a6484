//! Item catalog and per-user selection.
//!
//! A [`Catalog`] lists every slot and every item a profile knows about,
//! with each item naming the slots it fits. A [`Selection`] switches slots
//! and items off. [`Catalog::build_slots`] turns the two into the ordered,
//! pre-filtered slot list the engine expects.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::bnb::{BnbConfig, BnbRunner, SolverOutput};
use crate::model::{Item, ItemId, Slot, SlotId, StatId};
use crate::request::PreparedRequest;

/// A slot definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSlot {
    pub id: SlotId,
    pub name: String,
    /// Search order; ties are broken by id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sort_order: i32,
}

/// An item definition with its slot compatibility.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BTreeMap<StatId, f64>,
    pub compatible_slots: Vec<SlotId>,
}

impl CatalogItem {
    fn fits(&self, slot: SlotId) -> bool {
        self.compatible_slots.contains(&slot)
    }

    fn to_item(&self) -> Item {
        Item {
            id: self.id,
            name: self.name.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Slots and items switched off for one user. Anything not listed is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled_slots: HashSet<SlotId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled_items: HashSet<ItemId>,
}

impl Selection {
    pub fn disable_slot(mut self, slot: SlotId) -> Self {
        self.disabled_slots.insert(slot);
        self
    }

    pub fn disable_item(mut self, item: ItemId) -> Self {
        self.disabled_items.insert(item);
        self
    }

    pub fn slot_enabled(&self, slot: SlotId) -> bool {
        !self.disabled_slots.contains(&slot)
    }

    pub fn item_enabled(&self, item: ItemId) -> bool {
        !self.disabled_items.contains(&item)
    }
}

/// Every slot and item of a profile.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub slots: Vec<CatalogSlot>,
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, id: SlotId, name: impl Into<String>, sort_order: i32) -> Self {
        self.slots.push(CatalogSlot {
            id,
            name: name.into(),
            sort_order,
        });
        self
    }

    pub fn with_item(mut self, item: CatalogItem) -> Self {
        self.items.push(item);
        self
    }

    /// Active slots ordered by `(sort_order, id)`, each holding the enabled
    /// items compatible with it in catalog order.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use u_loadout::catalog::{Catalog, CatalogItem, Selection};
    ///
    /// let catalog = Catalog::new()
    ///     .with_slot(10, "Chest", 2)
    ///     .with_slot(20, "Head", 1)
    ///     .with_item(CatalogItem {
    ///         id: 1,
    ///         name: "Helm".into(),
    ///         stats: BTreeMap::from([(1, 10.0)]),
    ///         compatible_slots: vec![20],
    ///     });
    ///
    /// let slots = catalog.build_slots(&Selection::default());
    /// assert_eq!(slots[0].name, "Head");
    /// assert_eq!(slots[0].items.len(), 1);
    /// assert!(slots[1].items.is_empty());
    /// ```
    pub fn build_slots(&self, selection: &Selection) -> Vec<Slot> {
        let mut active: Vec<&CatalogSlot> = self
            .slots
            .iter()
            .filter(|s| selection.slot_enabled(s.id))
            .collect();
        active.sort_by_key(|s| (s.sort_order, s.id));

        active
            .into_iter()
            .map(|s| {
                Slot::new(s.id, s.name.clone()).with_items(
                    self.items
                        .iter()
                        .filter(|i| selection.item_enabled(i.id) && i.fits(s.id))
                        .map(CatalogItem::to_item),
                )
            })
            .collect()
    }

    /// Builds the slot list for `selection` and searches it.
    pub fn solve(
        &self,
        selection: &Selection,
        request: &PreparedRequest,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolverOutput {
        let slots = self.build_slots(selection);
        debug!(
            active_slots = slots.len(),
            disabled_slots = selection.disabled_slots.len(),
            disabled_items = selection.disabled_items.len(),
            "built slot list from catalog"
        );

        let config = BnbConfig::default().with_top_n(request.top_n());
        let problem = request.clone().into_problem(slots);
        BnbRunner::run_until(&problem, &config, deadline, cancel)
    }
}
