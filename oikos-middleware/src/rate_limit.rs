//! Per-provider sliding-window admission control.
//!
//! This is a preventive control: `acquire` runs before an attempt and hands
//! the caller a delay to sleep, while retry backoff reacts to failures after
//! the fact. Both windows are true sliding windows; timestamps older than
//! the window width are evicted before occupancy is computed.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use oikos_types::{ProviderId, RateLimitConfig};

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);

/// Per-provider admission state. Shared by all concurrent callers targeting
/// the provider; access is serialized through the limiter's mutex, which
/// also gives per-provider first-come-first-served admission ordering.
struct LimiterState {
    last_slot: Option<Instant>,
    minute_window: VecDeque<Instant>,
    hour_window: VecDeque<Instant>,
}

impl LimiterState {
    const fn new() -> Self {
        Self {
            last_slot: None,
            minute_window: VecDeque::new(),
            hour_window: VecDeque::new(),
        }
    }

    fn cleanup(&mut self, now: Instant) {
        evict_older_than(&mut self.minute_window, now, MINUTE);
        evict_older_than(&mut self.hour_window, now, HOUR);
    }
}

fn evict_older_than(window: &mut VecDeque<Instant>, now: Instant, width: Duration) {
    while let Some(&oldest) = window.front() {
        if now.saturating_duration_since(oldest) >= width {
            window.pop_front();
        } else {
            break;
        }
    }
}

/// Earliest instant at which one more request fits into the window, or
/// `None` when a slot is already free.
fn slot_available_at(
    window: &VecDeque<Instant>,
    now: Instant,
    width: Duration,
    cap: u32,
) -> Option<Instant> {
    let cap = cap as usize;
    if cap == 0 {
        // Degenerate config: space admissions a full window apart so we
        // never flood.
        return Some(now + width);
    }
    if window.len() < cap {
        return None;
    }
    // The request fits once the (len - cap + 1) oldest entries have exited;
    // the binding one is at index len - cap.
    Some(window[window.len() - cap] + width)
}

/// Per-provider sliding-window rate limiter.
///
/// [`acquire`](Self::acquire) reserves the caller's slot and records it under
/// a single lock, then returns the delay the caller must sleep before firing.
/// Reserving at acquisition time (rather than after the request completes)
/// means concurrent callers can never observe the same free slot twice, and
/// failed attempts still consume budget. The slot honors the minimum
/// inter-request spacing, the rolling 60-second budget, and the rolling
/// 3600-second budget; the binding constraint determines the delay.
pub struct RateLimiter {
    states: Mutex<HashMap<ProviderId, LimiterState>>,
    configs: HashMap<ProviderId, RateLimitConfig>,
}

impl RateLimiter {
    /// Build a limiter from per-provider budgets. Providers missing from the
    /// map get `RateLimitConfig::default()`.
    #[must_use]
    pub fn new(configs: HashMap<ProviderId, RateLimitConfig>) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            configs,
        }
    }

    fn config(&self, provider: ProviderId) -> RateLimitConfig {
        self.configs.get(&provider).copied().unwrap_or_default()
    }

    /// Reserve the next free slot for a request to `provider` and return the
    /// delay the caller must sleep before issuing it.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn acquire(&self, provider: ProviderId) -> Duration {
        self.acquire_at(provider, Instant::now())
    }

    /// Clock-injected variant of [`acquire`](Self::acquire), used by tests.
    #[must_use]
    pub fn acquire_at(&self, provider: ProviderId, now: Instant) -> Duration {
        let cfg = self.config(provider);
        let mut states = self.states.lock().expect("mutex poisoned");
        let state = states.entry(provider).or_insert_with(LimiterState::new);
        state.cleanup(now);

        let spacing = state.last_slot.map(|last| last + cfg.min_delay);
        let minute = slot_available_at(&state.minute_window, now, MINUTE, cfg.max_per_minute);
        let hour = slot_available_at(&state.hour_window, now, HOUR, cfg.max_per_hour);

        let mut slot = now;
        for candidate in [spacing, minute, hour].into_iter().flatten() {
            slot = slot.max(candidate);
        }
        // Slots are handed out in non-decreasing order, so the windows stay
        // sorted and eviction from the front remains correct.
        state.last_slot = Some(slot);
        state.minute_window.push_back(slot);
        state.hour_window.push_back(slot);

        slot.saturating_duration_since(now)
    }

    /// Slots at or before `now` still inside the rolling minute window.
    /// Reservations scheduled after `now` are not counted.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn minute_occupancy_at(&self, provider: ProviderId, now: Instant) -> usize {
        let mut states = self.states.lock().expect("mutex poisoned");
        let state = states.entry(provider).or_insert_with(LimiterState::new);
        state.cleanup(now);
        state.minute_window.iter().filter(|&&t| t <= now).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(min_delay_ms: u64, per_minute: u32, per_hour: u32) -> RateLimiter {
        RateLimiter::new(HashMap::from([(
            ProviderId::WorldBank,
            RateLimitConfig {
                min_delay: Duration::from_millis(min_delay_ms),
                max_per_minute: per_minute,
                max_per_hour: per_hour,
            },
        )]))
    }

    #[test]
    fn first_request_is_admitted_immediately() {
        let rl = limiter(500, 10, 100);
        assert_eq!(
            rl.acquire_at(ProviderId::WorldBank, Instant::now()),
            Duration::ZERO
        );
    }

    #[test]
    fn min_delay_is_the_binding_constraint_between_two_requests() {
        let rl = limiter(500, 10, 100);
        let t0 = Instant::now();
        assert_eq!(rl.acquire_at(ProviderId::WorldBank, t0), Duration::ZERO);
        let delay = rl.acquire_at(ProviderId::WorldBank, t0 + Duration::from_millis(100));
        assert_eq!(delay, Duration::from_millis(400));
    }

    #[test]
    fn minute_window_binds_once_saturated() {
        let rl = limiter(0, 3, 100);
        let t0 = Instant::now();
        for i in 0..3u64 {
            let _ = rl.acquire_at(ProviderId::WorldBank, t0 + Duration::from_secs(i));
        }
        // Window holds t0, t0+1s, t0+2s; the oldest must exit before a 4th fits.
        let now = t0 + Duration::from_secs(10);
        let delay = rl.acquire_at(ProviderId::WorldBank, now);
        assert_eq!(delay, Duration::from_secs(50));
    }

    #[test]
    fn windows_slide_rather_than_reset() {
        let rl = limiter(0, 2, 100);
        let t0 = Instant::now();
        let _ = rl.acquire_at(ProviderId::WorldBank, t0);
        let _ = rl.acquire_at(ProviderId::WorldBank, t0 + Duration::from_secs(30));
        // At t0+60s the first slot has exited; one is free again.
        assert_eq!(
            rl.acquire_at(ProviderId::WorldBank, t0 + Duration::from_secs(60)),
            Duration::ZERO
        );
        // But the second is still inside until t0+90s.
        let delay = rl.acquire_at(ProviderId::WorldBank, t0 + Duration::from_secs(61));
        assert_eq!(delay, Duration::from_secs(29));
    }

    #[test]
    fn providers_do_not_share_budgets() {
        let rl = limiter(0, 1, 100);
        let t0 = Instant::now();
        let _ = rl.acquire_at(ProviderId::WorldBank, t0);
        assert!(rl.acquire_at(ProviderId::WorldBank, t0) > Duration::ZERO);
        assert_eq!(rl.acquire_at(ProviderId::Eurostat, t0), Duration::ZERO);
    }

    #[test]
    fn a_free_slot_is_granted_to_only_one_of_two_simultaneous_callers() {
        let rl = limiter(0, 1, 100);
        let t0 = Instant::now();
        assert_eq!(rl.acquire_at(ProviderId::WorldBank, t0), Duration::ZERO);
        // The second caller at the same instant is pushed to the next slot,
        // not admitted into the one already taken.
        assert_eq!(
            rl.acquire_at(ProviderId::WorldBank, t0),
            Duration::from_secs(60)
        );
        assert_eq!(rl.minute_occupancy_at(ProviderId::WorldBank, t0), 1);
    }

    #[test]
    fn occupancy_never_exceeds_cap_when_delays_are_slept() {
        let rl = limiter(0, 5, 1000);
        let mut now = Instant::now();
        for _ in 0..25 {
            now += rl.acquire_at(ProviderId::WorldBank, now);
            assert!(rl.minute_occupancy_at(ProviderId::WorldBank, now) <= 5);
        }
    }
}
