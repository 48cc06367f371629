// src/refresh.rs
use std::time::{Duration, Instant};

/// Tracks when the source was last checked and whether a load is running.
///
/// The check time is taken when a load *finishes*, the same instant its
/// result is cached, so the schedule comes due exactly when that cache
/// entry expires.
pub struct RefreshSchedule {
    interval: Duration,
    last_check: Instant,
    loading: bool,
    rerun: bool,
}

impl RefreshSchedule {
    pub fn new(interval: Duration, now: Instant) -> Self {
        RefreshSchedule {
            interval,
            last_check: now,
            loading: false,
            rerun: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when a tick at `now` should reload.
    pub fn is_due(&self, now: Instant) -> bool {
        !self.loading && now.saturating_duration_since(self.last_check) >= self.interval
    }

    /// Records a check that did not start a load (cache hit, no source).
    pub fn mark_checked(&mut self, now: Instant) {
        self.last_check = now;
    }

    /// Returns false if a load is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Asks for another load once the running one has finished. The
    /// running load's result is stale from the caller's point of view.
    pub fn request_rerun(&mut self) {
        if self.loading {
            self.rerun = true;
        }
    }

    /// Ends the running load. Returns true when a rerun was requested while
    /// it ran; the finished result should then not be cached.
    pub fn finish_load(&mut self, now: Instant) -> bool {
        self.loading = false;
        self.last_check = now;
        std::mem::take(&mut self.rerun)
    }
}
