//! Cooperative stop signal: combined deadline plus cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a search stopped before exhausting the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The internal time ceiling or the caller's deadline passed.
    Deadline,
    /// The caller's cancellation flag was set.
    Cancelled,
}

/// Polled at the top of every search node.
///
/// The flag is an atomic load and is read on every poll; the clock is read
/// only when `polls & mask == 0` (the first poll always reads it).
#[derive(Debug)]
pub(crate) struct StopSignal {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    mask: u64,
    polls: u64,
    reason: Option<StopReason>,
}

impl StopSignal {
    /// `deadline` is the earlier of `start + time_limit` and the caller's deadline.
    pub fn new(
        start: Instant,
        time_limit: Duration,
        caller_deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
        mask: u64,
    ) -> Self {
        let ceiling = start.checked_add(time_limit);
        let deadline = match (ceiling, caller_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            deadline,
            cancel,
            mask,
            polls: 0,
            reason: None,
        }
    }

    /// Returns `true` once the search must stop. Sticky.
    #[inline]
    pub fn should_stop(&mut self) -> bool {
        if self.reason.is_some() {
            return true;
        }
        let check_clock = (self.polls & self.mask) == 0;
        self.polls = self.polls.wrapping_add(1);

        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.reason = Some(StopReason::Cancelled);
                return true;
            }
        }
        if check_clock {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.reason = Some(StopReason::Deadline);
                    return true;
                }
            }
        }
        false
    }

    pub fn reason(&self) -> Option<StopReason> {
        self.reason
    }
}
