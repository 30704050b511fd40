//! Deferred chart reloads after canvas resizes.
//!
//! Time is supplied by the caller, so the scheduler never sleeps or spawns.
//! The host calls [`ReloadScheduler::schedule`] on every resize and
//! [`ReloadScheduler::due`] on every tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use smithkit_settings::{ReloadPolicy, ResizeSettings};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingReload {
    at: Instant,
    size: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct ReloadScheduler {
    policy: ReloadPolicy,
    delay: Duration,
    pending: VecDeque<PendingReload>,
}

impl ReloadScheduler {
    pub fn new(policy: ReloadPolicy, delay: Duration) -> Self {
        Self {
            policy,
            delay,
            pending: VecDeque::new(),
        }
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue a reload for a canvas of `size` at `now + delay`.
    ///
    /// With [`ReloadPolicy::Debounce`] any reload still waiting is dropped.
    pub fn schedule(&mut self, size: (f64, f64), now: Instant) {
        if self.policy == ReloadPolicy::Debounce && !self.pending.is_empty() {
            tracing::debug!("Resize debounced, {} reload(s) cancelled", self.pending.len());
            self.pending.clear();
        }
        self.pending.push_back(PendingReload {
            at: now + self.delay,
            size,
        });
    }

    /// Sizes whose reload is due at `now`, oldest first.
    pub fn due(&mut self, now: Instant) -> Vec<(f64, f64)> {
        let mut ready = Vec::new();
        while let Some(next) = self.pending.front() {
            if next.at > now {
                break;
            }
            ready.push(next.size);
            self.pending.pop_front();
        }
        ready
    }

    /// Time of the next due reload, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.at)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl From<&ResizeSettings> for ReloadScheduler {
    fn from(settings: &ResizeSettings) -> Self {
        Self::new(settings.policy, settings.delay())
    }
}
