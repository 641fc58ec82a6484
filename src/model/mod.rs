//! Input model for the loadout engine.
//!
//! Plain value types describing one solve call:
//!
//! - **Slots**: ordered positions, each with the items allowed to occupy it
//! - **Items**: candidate occupants carrying a stat contribution map
//! - **Constraints**: hard limits on aggregate stat totals
//! - **Priorities**: signed weights defining the linear score
//!
//! The model carries no behavior beyond construction helpers. Cross-slot
//! item exclusivity (an item listed in several slots may occupy at most one)
//! is enforced by the search, not by these types.

mod operator;
mod types;

pub use operator::Operator;
pub use types::{Constraint, Item, ItemId, LoadoutProblem, Priority, Slot, SlotId, StatId};
