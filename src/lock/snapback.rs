use crate::core::constants::{GRACE_PERIOD_SECS, MESSAGE_THRESHOLD_SECS};

/// Countdown state. At most one timer is live at a time; arming while
/// already counting down replaces the countdown rather than stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapBackState {
    Inactive,
    CountingDown { remaining: u32 },
}

/// Proof of which countdown a tick belongs to. Cancellation bumps the
/// scheduler generation, so a late tick scheduled before the cancel carries
/// a stale handle and becomes a no-op instead of firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    generation: u64,
}

/// What a delivered tick amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick from a canceled or superseded countdown; nothing happened
    Stale,
    /// Countdown advanced by one second
    CountingDown { remaining: u32 },
    /// Grace period expired; force the live viewport to the locked one now
    SnapNow,
}

/// Counts down from the grace period once drift is detected while locked,
/// then demands a snap-back unless canceled first.
pub struct SnapBackScheduler {
    state: SnapBackState,
    grace_period_secs: u32,
    message_threshold_secs: u32,
    generation: u64,
}

impl SnapBackScheduler {
    pub fn new(grace_period_secs: u32, message_threshold_secs: u32) -> Self {
        Self {
            state: SnapBackState::Inactive,
            grace_period_secs,
            message_threshold_secs,
            generation: 0,
        }
    }

    pub fn state(&self) -> SnapBackState {
        self.state
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.state, SnapBackState::CountingDown { .. })
    }

    /// Start (or restart) the grace countdown. Cancel-and-replace: a handle
    /// from an earlier arm is invalidated.
    pub fn arm(&mut self) -> TickHandle {
        self.generation += 1;
        self.state = SnapBackState::CountingDown {
            remaining: self.grace_period_secs,
        };
        log::debug!("snap-back armed: {}s grace", self.grace_period_secs);
        TickHandle {
            generation: self.generation,
        }
    }

    /// Stop any active countdown. Late ticks for it become no-ops.
    pub fn cancel(&mut self) {
        if self.is_counting_down() {
            log::debug!("snap-back canceled");
        }
        self.generation += 1;
        self.state = SnapBackState::Inactive;
    }

    /// Advance the countdown by one second. Ticks carrying a stale handle
    /// are ignored, as are ticks while inactive.
    pub fn tick(&mut self, handle: TickHandle) -> TickOutcome {
        if handle.generation != self.generation {
            return TickOutcome::Stale;
        }

        match self.state {
            SnapBackState::Inactive => TickOutcome::Stale,
            SnapBackState::CountingDown { remaining } if remaining > 1 => {
                self.state = SnapBackState::CountingDown {
                    remaining: remaining - 1,
                };
                TickOutcome::CountingDown {
                    remaining: remaining - 1,
                }
            }
            SnapBackState::CountingDown { .. } => {
                self.generation += 1;
                self.state = SnapBackState::Inactive;
                log::info!("grace period expired; snapping back to saved view");
                TickOutcome::SnapNow
            }
        }
    }

    /// Countdown message for the status line. Shown only in the final
    /// stretch to avoid nagging; `None` clears the line.
    pub fn message(&self) -> Option<String> {
        match self.state {
            SnapBackState::CountingDown { remaining }
                if remaining <= self.message_threshold_secs =>
            {
                Some(format!("Returning to saved view in {}s", remaining))
            }
            _ => None,
        }
    }
}

impl Default for SnapBackScheduler {
    fn default() -> Self {
        Self::new(GRACE_PERIOD_SECS, MESSAGE_THRESHOLD_SECS)
    }
}
