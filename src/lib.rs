//! Exact top-N loadout optimization.
//!
//! Given ordered slots, the items each slot accepts, hard constraints on
//! aggregate stats and signed stat priorities, find the N highest-scoring
//! assignments of at most one item per slot, with each item used at most
//! once across all slots.
//!
//! - **Model** ([`model`]): slots, items, constraints, priorities and the
//!   comparison operators.
//! - **Branch and Bound** ([`bnb`]): the depth-first search engine with
//!   score and stat-range pruning, a bounded top-N result set, deadline and
//!   cancellation support.
//! - **Catalog** ([`catalog`]): turns a profile's slot and item catalog plus
//!   a user's disabled slots/items into the engine's slot list.
//! - **Requests** ([`request`]): validation of caller-submitted requests and
//!   saved presets.
//!
//! # Architecture
//!
//! The engine is synchronous, single-threaded per call and infallible: every
//! outcome (including timeouts and infeasible inputs) is a
//! [`SolverOutput`](bnb::SolverOutput). Validation lives in the outer layers
//! and reports [`error`] types. Independent problems can be solved
//! concurrently with [`BnbRunner::run_batch`](bnb::BnbRunner::run_batch)
//! under the `parallel` feature.

pub mod bnb;
pub mod catalog;
pub mod error;
pub mod model;
pub mod request;

#[cfg(feature = "wasm")]
pub mod wasm;
