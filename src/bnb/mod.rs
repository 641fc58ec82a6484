//! Branch and Bound (BnB) over slot assignments.
//!
//! An exact depth-first search that decides, slot by slot, which item (if
//! any) fills each slot. Two bounds cut the tree: a score bound that drops
//! subtrees unable to beat the worst of the current top-N, and a stat-range
//! bound that drops subtrees where some constraint can no longer be met.
//! A deadline and a cancellation flag stop the search cooperatively; the
//! best loadouts found so far are returned.
//!
//! # References
//!
//! - Land, A. H. & Doig, A. G. (1960). "An Automatic Method of Solving Discrete
//!   Programming Problems", *Econometrica* 28(3), 497-520.
//! - Lawler, E. L. & Wood, D. E. (1966). "Branch-and-Bound Methods: A Survey",
//!   *Operations Research* 14(4), 699-719.

mod bounds;
mod compile;
mod config;
mod presort;
mod result;
mod runner;
mod state;
mod stats;
mod stop;
mod topn;

pub use config::BnbConfig;
pub use presort::standalone_score;
pub use result::{SlotAssignment, SolverOutput, SolverResult};
pub use runner::{solve, BnbRunner};
pub use stats::SearchStats;
pub use stop::StopReason;
pub use topn::TopN;
