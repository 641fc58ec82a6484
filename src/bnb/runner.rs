//! Branch-and-bound execution engine.
//!
//! # Algorithm
//!
//! 1. Compile the problem to dense indices and (optionally) presort items
//! 2. Precompute suffix score and stat bounds
//! 3. Depth-first over slots; at each node:
//!    a. Poll the stop signal
//!    b. Prune if the best completion cannot beat the worst retained result
//!    c. Prune if some constraint is out of reach for every completion
//!    d. Branch on "leave empty", then on every unused compatible item,
//!       re-checking the score bound after each item is applied
//! 4. At a leaf, check constraints exactly and offer the loadout to the
//!    bounded result set
//!
//! The traversal mutates a single [`SearchState`] in place and restores it
//! on the way back up; nothing is allocated per node except for loadouts
//! that enter the result set.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::bounds::Bounds;
use super::compile::CompiledProblem;
use super::config::BnbConfig;
use super::presort::presort;
use super::result::{SlotAssignment, SolverOutput, SolverResult};
use super::state::SearchState;
use super::stats::SearchStats;
use super::stop::StopSignal;
use super::topn::TopN;
use crate::model::{Constraint, LoadoutProblem, Priority, Slot, StatId};

/// Branch-and-bound runner.
pub struct BnbRunner;

impl BnbRunner {
    /// Solves the problem with the configured time ceiling only.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_loadout::bnb::{BnbConfig, BnbRunner};
    /// use u_loadout::model::{Constraint, Item, LoadoutProblem, Priority, Slot};
    ///
    /// const ARMOR: u32 = 1;
    /// const WEIGHT: u32 = 2;
    ///
    /// let problem = LoadoutProblem::new(vec![
    ///     Slot::new(1, "Head").with_items([
    ///         Item::new(1, "Heavy Helm").with_stat(ARMOR, 30.0).with_stat(WEIGHT, 20.0),
    ///         Item::new(2, "Light Helm").with_stat(ARMOR, 10.0).with_stat(WEIGHT, 5.0),
    ///     ]),
    ///     Slot::new(2, "Chest").with_items([
    ///         Item::new(3, "Heavy Plate").with_stat(ARMOR, 50.0).with_stat(WEIGHT, 25.0),
    ///         Item::new(4, "Light Shirt").with_stat(ARMOR, 15.0).with_stat(WEIGHT, 8.0),
    ///     ]),
    /// ])
    /// .with_constraint(Constraint::at_most(WEIGHT, 30.0))
    /// .with_priority(Priority::new(ARMOR, 1.0));
    ///
    /// let output = BnbRunner::run(&problem, &BnbConfig::default());
    /// let best = output.best().unwrap();
    /// assert_eq!(best.score, 60.0);
    /// assert_eq!(best.item_ids().collect::<Vec<_>>(), vec![2, 3]);
    /// ```
    pub fn run(problem: &LoadoutProblem, config: &BnbConfig) -> SolverOutput {
        Self::run_until(problem, config, None, None)
    }

    /// Solves with an optional cancellation flag.
    ///
    /// Setting the flag to `true` stops the search at the next node; the
    /// results found so far are returned with `timed_out` set.
    pub fn run_with_cancel(
        problem: &LoadoutProblem,
        config: &BnbConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolverOutput {
        Self::run_until(problem, config, None, cancel)
    }

    /// Solves with an optional caller deadline and cancellation flag.
    ///
    /// The effective deadline is the earlier of `deadline` and
    /// `start + config.time_limit`.
    pub fn run_until(
        problem: &LoadoutProblem,
        config: &BnbConfig,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolverOutput {
        search(
            &problem.slots,
            &problem.constraints,
            &problem.priorities,
            config,
            deadline,
            cancel,
        )
    }

    /// Solves independent problems, in parallel with the `parallel` feature.
    ///
    /// Each problem gets its own search buffer and its own time ceiling.
    pub fn run_batch(problems: &[LoadoutProblem], config: &BnbConfig) -> Vec<SolverOutput> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            problems.par_iter().map(|p| Self::run(p, config)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            problems.iter().map(|p| Self::run(p, config)).collect()
        }
    }
}

/// Finds the `top_n` best loadouts.
///
/// Uses the default configuration (10 s ceiling) combined with the caller's
/// `deadline`. Returns immediately with an empty output when there are no
/// slots or no priorities.
///
/// ```
/// use u_loadout::bnb::solve;
/// use u_loadout::model::{Item, Priority, Slot};
///
/// let slots = vec![Slot::new(1, "Head").with_item(Item::new(1, "Helmet").with_stat(1, 10.0))];
/// let output = solve(&slots, &[], &[Priority::new(1, 1.0)], 5, None);
/// assert_eq!(output.results[0].score, 10.0);
/// assert!(!output.timed_out);
/// ```
pub fn solve(
    slots: &[Slot],
    constraints: &[Constraint],
    priorities: &[Priority],
    top_n: usize,
    deadline: Option<Instant>,
) -> SolverOutput {
    let config = BnbConfig::default().with_top_n(top_n);
    search(slots, constraints, priorities, &config, deadline, None)
}

fn search(
    slots: &[Slot],
    constraints: &[Constraint],
    priorities: &[Priority],
    config: &BnbConfig,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
) -> SolverOutput {
    if slots.is_empty() || priorities.is_empty() || config.top_n == 0 {
        debug!(
            slots = slots.len(),
            priorities = priorities.len(),
            top_n = config.top_n,
            "nothing to search"
        );
        return SolverOutput::empty();
    }

    let start = Instant::now();

    let mut problem = CompiledProblem::compile(slots, constraints, priorities);
    if config.presort {
        presort(&mut problem.slots);
    }
    let bounds = Bounds::compute(&problem);

    debug!(
        slots = problem.slot_count(),
        items = problem.key_count,
        constraints = constraints.len(),
        constrained_stats = problem.stat_count(),
        score_bound = bounds.max_score_from(0),
        "starting loadout search"
    );

    let mut search = Search {
        slots,
        problem: &problem,
        bounds: &bounds,
        tolerance: config.tolerance,
        state: SearchState::new(problem.slot_count(), problem.stat_count(), problem.key_count),
        results: TopN::new(config.top_n),
        stats: SearchStats::default(),
        stop: StopSignal::new(
            start,
            config.time_limit,
            deadline,
            cancel,
            config.clock_check_mask,
        ),
    };
    search.descend(0);

    let stop_reason = search.stop.reason();
    let stats = search.stats;
    let results = search.results.into_sorted_vec();
    let elapsed = start.elapsed();

    if let Some(reason) = stop_reason {
        warn!(
            ?reason,
            elapsed_ms = elapsed.as_millis() as u64,
            results = results.len(),
            "loadout search stopped early"
        );
    }
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        leaves = stats.leaves_evaluated,
        nodes = stats.nodes_explored,
        results = results.len(),
        timed_out = stop_reason.is_some(),
        "loadout search finished"
    );

    SolverOutput {
        results,
        timed_out: stop_reason.is_some(),
        stop_reason,
        elapsed,
        combinations_evaluated: stats.leaves_evaluated,
        stats,
    }
}

/// Per-call search context. Owns the mutable buffer and the result set.
struct Search<'a> {
    slots: &'a [Slot],
    problem: &'a CompiledProblem,
    bounds: &'a Bounds,
    tolerance: f64,
    state: SearchState,
    results: TopN<SolverResult>,
    stats: SearchStats,
    stop: StopSignal,
}

impl<'a> Search<'a> {
    fn descend(&mut self, depth: usize) {
        if self.stop.should_stop() {
            return;
        }
        self.stats.on_node(depth);

        if depth == self.problem.slot_count() {
            self.evaluate_leaf();
            return;
        }
        if !self.can_improve(depth) {
            self.stats.on_pruning_bound();
            return;
        }
        if !self.can_satisfy(depth) {
            self.stats.on_pruning_infeasible();
            return;
        }

        // Empty option.
        self.descend(depth + 1);
        if self.stopped() {
            return;
        }

        let problem = self.problem;
        for (index, item) in problem.slots[depth].items.iter().enumerate() {
            if self.state.used[item.key] {
                continue;
            }
            let applied = self.state.apply(depth, index, item);
            if self.can_improve(depth + 1) {
                self.descend(depth + 1);
            } else {
                self.stats.on_pruning_bound();
            }
            self.state.undo(depth, item, applied);
            if self.stopped() {
                return;
            }
        }
    }

    #[inline]
    fn stopped(&self) -> bool {
        self.stop.reason().is_some()
    }

    /// Whether the best completion from `depth` could still enter the result set.
    #[inline]
    fn can_improve(&self, depth: usize) -> bool {
        self.results.admits(self.state.score + self.bounds.max_score_from(depth))
    }

    /// Whether every constraint is still reachable from `depth`.
    #[inline]
    fn can_satisfy(&self, depth: usize) -> bool {
        self.problem.constraints.iter().all(|c| {
            let current = self.state.totals[c.stat];
            let (lo, hi) = self.bounds.stat_range_from(c.stat, depth);
            c.op.reachable(current + lo, current + hi, c.value, self.tolerance)
        })
    }

    fn evaluate_leaf(&mut self) {
        self.stats.on_leaf();

        let feasible = self
            .problem
            .constraints
            .iter()
            .all(|c| c.op.holds(self.state.totals[c.stat], c.value, self.tolerance));
        if feasible && self.results.admits(self.state.score) {
            let loadout = self.snapshot();
            self.results.offer(self.state.score, loadout);
            self.stats.on_result_recorded();
        }
    }

    /// Materializes the current assignment.
    fn snapshot(&self) -> SolverResult {
        let mut totals: BTreeMap<StatId, f64> =
            self.problem.stat_ids.iter().map(|&s| (s, 0.0)).collect();

        let assignments = self
            .slots
            .iter()
            .zip(&self.problem.slots)
            .zip(&self.state.assignment)
            .map(|((slot, compiled), choice)| match choice {
                Some(index) => {
                    let item = &slot.items[compiled.items[*index].source];
                    for (&stat, &value) in &item.stats {
                        *totals.entry(stat).or_insert(0.0) += value;
                    }
                    SlotAssignment {
                        slot_id: slot.id,
                        slot_name: slot.name.clone(),
                        item_id: Some(item.id),
                        item_name: Some(item.name.clone()),
                        item_stats: item.stats.clone(),
                    }
                }
                None => SlotAssignment {
                    slot_id: slot.id,
                    slot_name: slot.name.clone(),
                    item_id: None,
                    item_name: None,
                    item_stats: BTreeMap::new(),
                },
            })
            .collect();

        SolverResult {
            assignments,
            score: self.state.score,
            stat_totals: totals,
        }
    }
}
