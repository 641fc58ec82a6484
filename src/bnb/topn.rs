//! Bounded best-N collection with duplicate scores.

/// Keeps at most `capacity` entries with the highest scores.
///
/// Entries are stored ascending by score so the worst one sits at index 0.
/// Equal scores are allowed. Once full, a candidate is accepted only if it
/// scores strictly above the current worst; among equal scores the one found
/// first is kept.
///
/// # Examples
///
/// ```
/// use u_loadout::bnb::TopN;
///
/// let mut top = TopN::new(2);
/// assert!(top.offer(5.0, "a"));
/// assert!(top.offer(9.0, "b"));
/// assert!(!top.offer(5.0, "c")); // ties the worst: dropped
/// assert!(top.offer(7.0, "d"));  // evicts "a"
/// assert_eq!(top.into_sorted_vec(), vec!["b", "d"]);
/// ```
#[derive(Debug, Clone)]
pub struct TopN<T> {
    capacity: usize,
    entries: Vec<(f64, T)>,
}

/// Entries reserved up front; larger capacities grow on demand.
const PREALLOC: usize = 32;

impl<T> TopN<T> {
    /// Creates an empty collection holding at most `capacity` entries.
    ///
    /// Any `capacity` is accepted; memory grows with the entries actually kept.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(PREALLOC)),
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `capacity` entries are held; further offers must beat the worst.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Lowest retained score, if any.
    pub fn worst_score(&self) -> Option<f64> {
        self.entries.first().map(|(score, _)| *score)
    }

    /// Whether a candidate with `score` would be kept.
    #[inline]
    pub fn admits(&self, score: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        match self.worst_score() {
            Some(worst) if self.is_full() => score > worst,
            _ => true,
        }
    }

    /// Offers a candidate. Returns `true` if it was kept.
    pub fn offer(&mut self, score: f64, value: T) -> bool {
        if !self.admits(score) {
            return false;
        }
        if self.is_full() {
            self.entries.remove(0);
        }
        // Before any equal scores: reversed at the end, earlier finds come
        // first, and the latest of several tied worst entries is evicted.
        let pos = self.entries.partition_point(|(s, _)| *s < score);
        self.entries.insert(pos, (score, value));
        true
    }

    /// Consumes the collection, best first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.entries.into_iter().rev().map(|(_, v)| v).collect()
    }
}
