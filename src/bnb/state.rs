//! Mutable search buffer with an undo trail.
//!
//! One buffer is shared by the whole depth-first traversal. Applying an item
//! records the previous values of every total it touches on a linear trail;
//! undoing restores them verbatim, so totals never drift through repeated
//! add/subtract cycles.

use super::compile::CompiledItem;

/// Marker returned by [`SearchState::apply`] and consumed by [`SearchState::undo`].
#[derive(Debug, Clone, Copy)]
#[must_use]
pub(crate) struct Applied {
    trail_start: usize,
    old_score: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    /// Running weighted score.
    pub score: f64,
    /// Running totals of constrained stats, by stat index.
    pub totals: Vec<f64>,
    /// Used-item flags, by item key.
    pub used: Vec<bool>,
    /// Tentative assignment per slot: index into the compiled slot's items.
    pub assignment: Vec<Option<usize>>,
    trail: Vec<(usize, f64)>,
}

impl SearchState {
    pub fn new(slot_count: usize, stat_count: usize, key_count: usize) -> Self {
        Self {
            score: 0.0,
            totals: vec![0.0; stat_count],
            used: vec![false; key_count],
            assignment: vec![None; slot_count],
            trail: Vec::with_capacity(slot_count * stat_count.max(1)),
        }
    }

    /// Places `item` (at position `index` in slot `depth`'s item list).
    #[inline]
    pub fn apply(&mut self, depth: usize, index: usize, item: &CompiledItem) -> Applied {
        let applied = Applied {
            trail_start: self.trail.len(),
            old_score: self.score,
        };
        for &(stat, value) in &item.stats {
            self.trail.push((stat, self.totals[stat]));
            self.totals[stat] += value;
        }
        self.score += item.score;
        self.used[item.key] = true;
        self.assignment[depth] = Some(index);
        applied
    }

    /// Reverts the matching [`apply`](Self::apply).
    #[inline]
    pub fn undo(&mut self, depth: usize, item: &CompiledItem, applied: Applied) {
        while self.trail.len() > applied.trail_start {
            if let Some((stat, old)) = self.trail.pop() {
                self.totals[stat] = old;
            }
        }
        self.score = applied.old_score;
        self.used[item.key] = false;
        self.assignment[depth] = None;
    }

    #[cfg(test)]
    fn trail_len(&self) -> usize {
        self.trail.len()
    }
}
