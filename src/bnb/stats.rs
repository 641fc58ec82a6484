//! Search counters.

use std::fmt;

/// Counters collected during one branch-and-bound search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes entered, leaves included.
    pub nodes_explored: u64,
    /// Fully decided assignments checked against the constraints.
    pub leaves_evaluated: u64,
    /// Subtrees cut because they could not beat the worst retained score.
    pub prunings_bound: u64,
    /// Subtrees cut because some constraint became unreachable.
    pub prunings_infeasible: u64,
    /// Feasible leaves that entered the result set.
    pub results_recorded: u64,
    /// Deepest level reached (equals the slot count once a leaf is seen).
    pub max_depth: usize,
}

impl SearchStats {
    #[inline]
    pub(crate) fn on_node(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn on_leaf(&mut self) {
        self.leaves_evaluated = self.leaves_evaluated.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_result_recorded(&mut self) {
        self.results_recorded = self.results_recorded.saturating_add(1);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loadout search statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Leaves evaluated:      {}", self.leaves_evaluated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Results recorded:      {}", self.results_recorded)?;
        writeln!(f, "  Max depth:             {}", self.max_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SearchStats::default();
        stats.on_node(0);
        stats.on_node(3);
        stats.on_node(1);
        stats.on_leaf();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_pruning_infeasible();
        stats.on_result_recorded();

        assert_eq!(stats.nodes_explored, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.leaves_evaluated, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_infeasible, 2);
        assert_eq!(stats.results_recorded, 1);
    }

    #[test]
    fn test_display() {
        let text = SearchStats::default().to_string();
        assert!(text.contains("Nodes explored:"));
        assert!(text.contains("Prunings (infeasible): 0"));
    }
}
