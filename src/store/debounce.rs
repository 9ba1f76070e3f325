use std::time::{Duration, Instant};

/// Handle for the one save the store has scheduled.
///
/// Each mutation replaces the handle with a fresh one due a full quiet
/// interval later, which is what cancels the previous timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSave {
    due: Instant,
    /// Sequence number of the mutation that scheduled this save
    seq: u64,
}

impl PendingSave {
    pub fn schedule(now: Instant, interval: Duration, seq: u64) -> Self {
        PendingSave {
            due: now + interval,
            seq,
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left before the save fires (zero once due)
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
